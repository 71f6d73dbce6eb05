//! Director roster from TOML (`[[directors]]` array)
//!
//! ```toml
//! [[directors]]
//! id = "lovelace"
//! name = "Ada Lovelace"
//! title = "Mathematician and first programmer"
//! background = "Victorian analyst of the Analytical Engine..."
//! ```
//!
//! A configured array replaces the built-in roster entirely.

use boardroom_domain::Director;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDirectorConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub background: String,
}

impl FileDirectorConfig {
    fn new(id: &str, name: &str, title: &str, background: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            title: title.to_string(),
            background: background.to_string(),
        }
    }

    pub fn to_director(&self) -> Director {
        Director::new(
            self.id.as_str(),
            self.name.as_str(),
            self.title.as_str(),
            self.background.as_str(),
        )
    }
}

/// Built-in roster used when the config defines none
pub fn default_directors() -> Vec<FileDirectorConfig> {
    vec![
        FileDirectorConfig::new(
            "socrates",
            "Socrates",
            "Athenian philosopher",
            "Questions every assumption through relentless dialogue. Claims to know nothing, \
             distrusts written arguments and rhetoric, and values virtue above wealth.",
        ),
        FileDirectorConfig::new(
            "confucius",
            "Confucius",
            "Philosopher and educator",
            "Believes social harmony rests on ritual, filial piety and rulers of good character. \
             Speaks in measured aphorisms and appeals to the example of the ancients.",
        ),
        FileDirectorConfig::new(
            "lovelace",
            "Ada Lovelace",
            "Mathematician and first programmer",
            "Victorian analyst of the Analytical Engine who saw machines composing music. \
             Combines poetic imagination with rigorous notation; sceptical that machines originate ideas.",
        ),
        FileDirectorConfig::new(
            "smith",
            "Adam Smith",
            "Moral philosopher and economist",
            "Author of The Wealth of Nations and The Theory of Moral Sentiments. Trusts markets \
             guided by sympathy and fair rules, and distrusts monopolies and merchant lobbies.",
        ),
    ]
}
