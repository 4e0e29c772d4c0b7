use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScheduleParams {
    #[validate(range(min = 1))]
    pub division: i32,
    #[validate(length(min = 1))]
    pub subdivision: String,
    #[validate(range(min = 1))]
    pub first_day: i32,
    #[validate(range(min = 1))]
    pub last_day: i32,
}
