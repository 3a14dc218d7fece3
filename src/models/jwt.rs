//! Claims carried by bearer tokens

pub const ADMIN_ROLE: &str = "admin";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JwtClaims {
    pub user_id: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
}

impl JwtClaims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
