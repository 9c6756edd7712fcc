use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub results_table_name: String,
}
