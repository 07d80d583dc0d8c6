mod catalog;
mod delivery;
mod order;
mod session;
mod user;

pub use catalog::{
    Category, Color, Item, ItemColor, NewCategory, NewColor, NewItem, NewPaymentMethod, NewTag,
    PaymentMethod, Tag,
};
pub use delivery::{Delivery, DeliveryCompany, DeliveryInput, DeliveryView};
pub use order::{
    CreateOrder, EnrichedOrder, NewOrder, NewOrderLine, Order, OrderItem, OrderLine, Status,
};
pub use session::{NewSession, Session};
pub use user::{NewUser, User};
