use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ModelError;
use crate::ir::Unit;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Parse a compiled unit; `origin` names the source in errors.
pub fn unit_from_str(src: &str, origin: &str) -> Result<Unit, ModelError> {
    from_str_with_path::<Unit>(src).map_err(|reason| ModelError::Load {
        origin: origin.to_owned(),
        reason,
    })
}

pub fn unit_from_file(path: &Path) -> Result<Unit, ModelError> {
    let origin = path.display().to_string();
    let src = std::fs::read_to_string(path).map_err(|e| ModelError::Load {
        origin: origin.clone(),
        reason: e.to_string(),
    })?;
    unit_from_str(&src, &origin)
}
