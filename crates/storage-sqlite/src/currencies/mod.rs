mod model;
mod repository;

pub use model::UserCurrencyDB;
pub use repository::UserCurrencyRepository;
