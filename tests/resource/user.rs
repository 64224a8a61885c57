use cask::Table;
use std::net::IpAddr;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Table, Debug, Clone)]
#[cask(keyspace = "app", name = "users", views(by_email = email, by_country = (country, signup)))]
pub struct User {
    #[cask(partition_key)]
    pub id: i64,
    #[cask(type = "ascii")]
    pub email: String,
    pub name: String,
    pub country: Option<String>,
    pub age: Option<i32>,
    pub score: f64,
    pub active: bool,
    pub signup: OffsetDateTime,
    pub last_ip: Option<IpAddr>,
}

impl User {
    pub fn sample(id: i64) -> Self {
        Self {
            id,
            email: format!("user{id}@example.com"),
            name: format!("User {id}"),
            country: Some("IT".into()),
            age: None,
            score: 1.5,
            active: true,
            signup: OffsetDateTime::UNIX_EPOCH,
            last_ip: None,
        }
    }
}

#[derive(Table, Debug, Clone)]
#[cask(keyspace = "app")]
pub struct Order {
    #[cask(partition_key)]
    pub user_id: i64,
    #[cask(clustering_key)]
    pub order_id: Uuid,
    pub amount: rust_decimal::Decimal,
    #[cask(name = "note")]
    pub _comment: Option<String>,
}

#[derive(Table, Debug, Clone)]
#[cask(keyspace = "archive", name = "users")]
pub struct ArchivedUser {
    #[cask(partition_key)]
    pub id: i64,
    pub name: String,
}
