use super::ids::UserId;
use super::our_date_time::OurDateTime;

/// The slice of a `Users` row this service cares about: whether it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub created_at: OurDateTime,
    pub updated_at: OurDateTime,
}
