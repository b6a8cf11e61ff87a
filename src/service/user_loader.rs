use std::{collections::HashMap, fs, path::Path};
use tracing::info;

use crate::error::GatewayError;

/// Load the credential table from a JSON object file of
/// `{"username": "password"}` entries. Keys are unique by construction.
pub fn load_from_file(path: &Path) -> Result<HashMap<String, String>, GatewayError> {
    let contents = fs::read_to_string(path)?;
    let users: HashMap<String, String> = serde_json::from_str(&contents)?;
    info!(path = %path.display(), count = users.len(), "loaded credential table");
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn parses_user_map_from_json() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("snapforge-users-{}-{}.json", std::process::id(), nanos));

        fs::write(&path, r#"{"alice": "wonderland", "bob": "builder"}"#)
            .expect("write temp users file");

        let users = load_from_file(&path).expect("users file parses");
        assert_eq!(users.len(), 2);
        assert_eq!(users.get("alice").map(String::as_str), Some("wonderland"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut path = std::env::temp_dir();
        path.push(format!("snapforge-users-bad-{}.json", std::process::id()));
        fs::write(&path, "not json").expect("write temp users file");

        assert!(load_from_file(&path).is_err());

        let _ = fs::remove_file(&path);
    }
}
