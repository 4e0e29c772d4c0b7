use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamParams {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(range(min = 1))]
    pub division: i32,
    #[validate(length(min = 1, max = 64))]
    pub subdivision: String,
}
