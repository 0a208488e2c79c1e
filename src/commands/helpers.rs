//! Shared helpers for command implementations

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use gavel_core::error::{GavelError, Result};
use gavel_core::rubric::CriterionInput;
use gavel_core::store::Store;

use crate::cli::Cli;

/// Open the store from --store, or discover it from --root / the cwd
pub fn open_store(cli: &Cli, root: &Path) -> Result<Store> {
    match &cli.store {
        Some(path) => Store::open(path),
        None => Store::discover(root),
    }
}

/// Read the criteria array from a JSON file, or stdin for "-"
pub fn read_criteria(path: &str) -> Result<Vec<CriterionInput>> {
    let content = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    let criteria: Vec<CriterionInput> = serde_json::from_str(&content)?;
    Ok(criteria)
}

/// Parse repeated `--score CID=VALUE` arguments into a raw score map
pub fn parse_scores(args: &[String]) -> Result<HashMap<String, f64>> {
    let mut scores = HashMap::new();
    for arg in args {
        let (cid, value) = arg.split_once('=').ok_or_else(|| {
            GavelError::UsageError(format!(
                "invalid --score {:?} (expected criterion-id=value)",
                arg
            ))
        })?;
        if cid.is_empty() {
            return Err(GavelError::UsageError(format!(
                "invalid --score {:?}: empty criterion id",
                arg
            )));
        }
        let value: f64 = value.parse().map_err(|_| {
            GavelError::UsageError(format!("invalid --score {:?}: {:?} is not a number", arg, value))
        })?;
        scores.insert(cid.to_string(), value);
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scores() {
        let scores = parse_scores(&[
            "cr-technical=8".to_string(),
            "cr-design=7.5".to_string(),
        ])
        .unwrap();
        assert_eq!(scores.get("cr-technical"), Some(&8.0));
        assert_eq!(scores.get("cr-design"), Some(&7.5));
    }

    #[test]
    fn test_parse_scores_rejects_missing_eq() {
        assert!(matches!(
            parse_scores(&["cr-technical".to_string()]).unwrap_err(),
            GavelError::UsageError(_)
        ));
    }

    #[test]
    fn test_parse_scores_rejects_non_number() {
        assert!(matches!(
            parse_scores(&["cr-technical=high".to_string()]).unwrap_err(),
            GavelError::UsageError(_)
        ));
    }

    #[test]
    fn test_parse_scores_rejects_empty_id() {
        assert!(parse_scores(&["=5".to_string()]).is_err());
    }

    #[test]
    fn test_read_criteria_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("criteria.json");
        std::fs::write(
            &path,
            r#"[{"name": "Technical", "weight": 60, "max_score": 10},
                {"name": "Design", "description": "Visual polish", "weight": 40, "max_score": 10}]"#,
        )
        .unwrap();

        let criteria = read_criteria(path.to_str().unwrap()).unwrap();
        assert_eq!(criteria.len(), 2);
        assert_eq!(criteria[0].name, "Technical");
        assert!(criteria[0].id.is_none());
        assert_eq!(criteria[1].description, "Visual polish");
    }
}
