use serde::{Deserialize, Serialize};

/// JWT claims issued by the external identity collaborator. Only verified
/// here; this service never mints organizer tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,

    #[serde(rename = "https://guestlist.app/claims/csrf")]
    pub csrf_token: String,
}

/// The authenticated organizer identity, passed explicitly into every
/// owner-scoped operation.
#[derive(Debug, Clone)]
pub struct Organizer {
    pub id: String,
}
