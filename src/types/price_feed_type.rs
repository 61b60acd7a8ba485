use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Price_Feed_Type {
    pub price: String,
}
