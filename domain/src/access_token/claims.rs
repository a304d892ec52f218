//! Claims carried by the access tokens presented to the LiveKit Cloud API.
//!
//! LiveKit tokens are standard HS256 JWTs whose permissions live in a `video`
//! grant object. Listing a project's session history needs only `roomList`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AnalyticsClaims {
    pub(crate) exp: usize,
    pub(crate) nbf: usize,
    pub(crate) iss: String,
    pub(crate) sub: String,
    pub(crate) video: VideoGrant,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct VideoGrant {
    // LiveKit requires the grant names in JS style case.
    #[serde(rename = "roomList")]
    pub(crate) room_list: bool,
}
