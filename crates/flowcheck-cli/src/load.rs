use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use flowcheck_expr::ValuesMap;
use flowcheck_verify::VerifyConfig;

/// Read a result document. A missing file is `None`, not an error, so the
/// verifier can report it as a missing result.
pub fn read_document(path: &Path) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Load a values map from a JSON or YAML file, chosen by extension.
pub fn load_values(path: Option<&Path>) -> anyhow::Result<ValuesMap> {
    let Some(path) = path else {
        return Ok(ValuesMap::empty());
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let root: serde_json::Value = if is_yaml(path) {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))?
    };
    Ok(ValuesMap::new(root))
}

/// Load comparison settings from a TOML file, or the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<VerifyConfig> {
    let Some(path) = path else {
        return Ok(VerifyConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config in {}", path.display()))
}

/// Case name derived from a result file name: `login.expected.yaml` -> `login`.
pub fn case_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("case")
        .to_string()
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcheck_diff::DiffAlgorithm;

    #[test]
    fn missing_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_document(&dir.path().join("nope.yaml")).unwrap().is_none());
    }

    #[test]
    fn reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.yaml");
        fs::write(&path, "a: 1\n").unwrap();
        assert_eq!(read_document(&path).unwrap().as_deref(), Some("a: 1\n"));
    }

    #[test]
    fn values_from_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("v.json");
        let yaml_path = dir.path().join("v.yml");
        fs::write(&json_path, r#"{"user": {"id": 5}}"#).unwrap();
        fs::write(&yaml_path, "user:\n  id: 5\n").unwrap();

        for path in [&json_path, &yaml_path] {
            let values = load_values(Some(path.as_path())).unwrap();
            assert_eq!(values.resolve("user.id").as_deref(), Some("5"));
        }
    }

    #[test]
    fn no_values_file_is_empty_map() {
        assert_eq!(load_values(None).unwrap(), ValuesMap::empty());
    }

    #[test]
    fn invalid_values_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_values(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowcheck.toml");
        fs::write(&path, "algorithm = \"lcs\"\nanchor_wildcards = false\n").unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.algorithm, DiffAlgorithm::Lcs);
        assert!(!config.anchor_wildcards);
        assert_eq!(load_config(None).unwrap(), VerifyConfig::default());
    }

    #[test]
    fn case_names() {
        assert_eq!(case_name(Path::new("results/login.expected.yaml")), "login");
        assert_eq!(case_name(Path::new("login")), "login");
        assert_eq!(case_name(Path::new(".hidden")), "case");
    }
}
