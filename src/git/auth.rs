//! Git authentication for pushing the staged tree
//!
//! Authentication is delegated to git's native credential system:
//! - SSH agent, then SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Environment variables (`GIT_SSH_COMMAND`, etc.)

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode, RemoteCallbacks};

const SSH_KEYS: &[&str] = &["id_ed25519", "id_rsa", "id_ecdsa"];

fn auth_error(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Http, message)
}

fn ssh_key_credentials(username: &str) -> Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    for key_name in SSH_KEYS {
        let private_key = ssh_dir.join(key_name);
        if !private_key.exists() {
            continue;
        }

        let public_key = ssh_dir.join(format!("{key_name}.pub"));
        let public_key_path = public_key.exists().then_some(public_key.as_path());

        if let Ok(cred) = Cred::ssh_key(username, public_key_path, &private_key, None) {
            return Ok(cred);
        }
    }

    Err(auth_error("no usable SSH key found"))
}

fn helper_credentials(url: &str, username_from_url: Option<&str>) -> Result<Cred, Error> {
    let config = git2::Config::open_default().or_else(|_| git2::Config::new())?;

    Cred::credential_helper(&config, url, username_from_url)
        .map_err(|_| auth_error("no credential helper returned credentials"))
}

/// Set up authentication callbacks for push
pub fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks<'_>) {
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_credentials(username));
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return helper_credentials(url, username_from_url);
        }

        Err(auth_error("authentication failed"))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_class() {
        let err = auth_error("nope");
        assert_eq!(err.code(), ErrorCode::Auth);
        assert_eq!(err.message(), "nope");
    }

    #[test]
    fn test_setup_auth_callbacks_installs_handler() {
        let mut callbacks = RemoteCallbacks::new();
        setup_auth_callbacks(&mut callbacks);
    }
}
