//! Interactive prompts for CLI commands
//!
//! Uses dialoguer to ask for connection details the operator did not pass.

use std::io::IsTerminal;

use dialoguer::{Input, Password};

use crate::error::{CliError, Result};

/// A complete set of Portainer connection details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Fill in whatever is missing from `url`, `username` and `password`.
///
/// Prompts only when stdin is a terminal; otherwise a missing value is a
/// user error naming the flag and environment variable to set.
pub fn complete_connection(
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<Connection> {
    let url = match url {
        Some(url) => url,
        None => prompt_text("Portainer URL", "--url", "PORTAINER_URL")?,
    };
    let username = match username {
        Some(username) => username,
        None => prompt_text("Username", "--username", "PORTAINER_USERNAME")?,
    };
    let password = match password {
        Some(password) => password,
        None => {
            ensure_terminal("password", "--password", "PORTAINER_PASSWORD")?;
            Password::new().with_prompt("Password").interact()?
        }
    };

    Ok(Connection {
        url,
        username,
        password,
    })
}

fn prompt_text(prompt: &str, flag: &str, env: &str) -> Result<String> {
    ensure_terminal(&prompt.to_lowercase(), flag, env)?;
    let value: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(value.trim().to_string())
}

fn ensure_terminal(what: &str, flag: &str, env: &str) -> Result<()> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "No {} given and stdin is not a terminal: pass {} or set {}",
            what, flag, env
        )))
    }
}
