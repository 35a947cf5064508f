//! bcrypt hashing off the async runtime.

use crate::error::AppError;

/// Hashes `password` with the given bcrypt cost on a blocking thread.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(join_error)??;

    Ok(hash)
}

/// Checks `password` against a stored bcrypt hash. Malformed hashes never
/// match.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(join_error)?;

    Ok(matches)
}

fn join_error(e: tokio::task::JoinError) -> AppError {
    tracing::error!(error = %e, "password task failed");
    AppError::server("Server Error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("123456".into(), 4).await.unwrap();

        assert!(hash.starts_with("$2"));
        assert!(verify_password("123456".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("654321".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_does_not_match() {
        assert!(!verify_password("x".into(), "not-a-hash".into()).await.unwrap());
    }
}
