//! Bearer token issuing and checking
use chrono::Utc;
use failure::Error as FailureError;
use hyper::header::{Authorization, Headers};
use jsonwebtoken::{decode, encode, Header, Validation};

use errors::Error;
use models::JwtClaims;

/// Signs a HS256 token for `user_id` with `role`, valid for `ttl_sec` seconds from now
pub fn generate_token(user_id: &str, role: &str, secret: &str, ttl_sec: i64) -> Result<String, FailureError> {
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
        user_id: user_id.to_string(),
        role: role.to_string(),
        exp: now + ttl_sec,
        iat: now,
        nbf: now,
    };

    encode(&Header::default(), &claims, secret.as_bytes()).map_err(|e| format_err!("Failed to sign token: {}", e))
}

/// Checks `Authorization: Bearer <token>` and returns the claims of an admin.
pub fn authorize_admin(headers: &Headers, secret: &str) -> Result<JwtClaims, FailureError> {
    let header = headers
        .get::<Authorization<String>>()
        .ok_or_else(|| format_err!("Authorization header is required").context(Error::Unauthorized))?;

    let mut parts = header.0.splitn(2, ' ');
    let token = match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) if !token.trim().is_empty() => token.trim(),
        _ => return Err(format_err!("Invalid authorization header format").context(Error::Unauthorized).into()),
    };

    let token_data = decode::<JwtClaims>(token, secret.as_bytes(), &Validation::default())
        .map_err(|e| format_err!("Invalid or expired token: {}", e).context(Error::Unauthorized))?;

    let claims = token_data.claims;
    if !claims.is_admin() {
        warn!("User {} with role {} tried to access admin route.", claims.user_id, claims.role);
        return Err(format_err!("Admin access required").context(Error::Forbidden).into());
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use errors::{describe, kind_of};
    use models::ADMIN_ROLE;

    static SECRET: &'static str = "test-secret";

    fn headers_with(value: &str) -> Headers {
        let mut headers = Headers::new();
        headers.set(Authorization(value.to_string()));
        headers
    }

    #[test]
    fn test_admin_token_is_accepted() {
        let token = generate_token("1", ADMIN_ROLE, SECRET, 3600).unwrap();
        let claims = authorize_admin(&headers_with(&format!("Bearer {}", token)), SECRET).unwrap();
        assert_eq!(claims.user_id, "1");
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_missing_header() {
        let err = authorize_admin(&Headers::new(), SECRET).unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::Unauthorized));
        assert_eq!(describe(&err), "Authorization header is required");
    }

    #[test]
    fn test_wrong_scheme() {
        let token = generate_token("1", ADMIN_ROLE, SECRET, 3600).unwrap();
        let err = authorize_admin(&headers_with(&format!("Basic {}", token)), SECRET).unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::Unauthorized));
        assert_eq!(describe(&err), "Invalid authorization header format");
    }

    #[test]
    fn test_foreign_secret() {
        let token = generate_token("1", ADMIN_ROLE, "other-secret", 3600).unwrap();
        let err = authorize_admin(&headers_with(&format!("Bearer {}", token)), SECRET).unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::Unauthorized));
    }

    #[test]
    fn test_expired_token() {
        let token = generate_token("1", ADMIN_ROLE, SECRET, -3600).unwrap();
        let err = authorize_admin(&headers_with(&format!("Bearer {}", token)), SECRET).unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::Unauthorized));
    }

    #[test]
    fn test_non_admin_is_forbidden() {
        let token = generate_token("2", "customer", SECRET, 3600).unwrap();
        let err = authorize_admin(&headers_with(&format!("Bearer {}", token)), SECRET).unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::Forbidden));
        assert_eq!(describe(&err), "Admin access required");
    }
}
