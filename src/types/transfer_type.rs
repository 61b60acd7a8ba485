use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Transfer_Type {
    pub from: String,
    pub to: String,
    pub value: String,
}
