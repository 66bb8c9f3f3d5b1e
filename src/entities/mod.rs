//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod block;
pub mod construction;
pub mod household;
pub mod notification;
pub mod payment;
pub mod report;
pub mod service_request;
pub mod status;
pub mod user;

// Re-export specific types to avoid conflicts
pub use block::{Column as BlockColumn, Entity as Block, Model as BlockModel};
pub use construction::{
    Column as ConstructionColumn, Entity as Construction, Model as ConstructionModel,
};
pub use household::{Column as HouseholdColumn, Entity as Household, Model as HouseholdModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use report::{Column as ReportColumn, Entity as Report, Model as ReportModel};
pub use service_request::{
    Column as ServiceRequestColumn, Entity as ServiceRequest, Model as ServiceRequestModel,
};
pub use status::{Audience, HouseholdStatus, PaymentStatus, UserType};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
