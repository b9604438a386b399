#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(&self, username: &str) -> String {
        match self {
            Sender::User => return username.to_string(),
            Sender::Bot => return String::from("Macento"),
        }
    }
}
