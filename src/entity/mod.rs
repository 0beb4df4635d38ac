pub mod blog_posts;
pub mod categories;
pub mod chat_messages;
pub mod contacts;
pub mod newsletters;
pub mod products;
pub mod testimonials;

pub use blog_posts::Entity as BlogPosts;
pub use categories::Entity as Categories;
pub use chat_messages::Entity as ChatMessages;
pub use contacts::Entity as Contacts;
pub use newsletters::Entity as Newsletters;
pub use products::Entity as Products;
pub use testimonials::Entity as Testimonials;
