use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a login token. The token is bound to the user's email;
/// no other identity or role information is issued.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

/// Issue an HS256 token for `email`, valid for `expiry_secs` from now.
pub fn issue_token(
    email: &str,
    secret: &str,
    expiry_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp() as u64;
    let claims = Claims {
        email: email.to_string(),
        iat: now,
        exp: now + expiry_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a token issued by `issue_token`.
///
/// No route currently guards on this; it exists so clients and tests can
/// verify what a token asserts.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn issued_token_decodes_to_the_same_email() {
        let token = issue_token("donor@example.com", SECRET, 3600).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.email, "donor@example.com");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn token_rejected_with_wrong_secret() {
        let token = issue_token("donor@example.com", SECRET, 3600).unwrap();
        let err = decode_token(&token, "some-other-secret").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            email: "donor@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let mut validation = Validation::default();
        validation.leeway = 0;
        let err = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }
}
