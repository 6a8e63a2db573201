// core/src/model/mod.rs

pub mod account;
pub mod catalog;
pub mod order;
pub mod pricing;

pub use account::AdminAccount;
pub use catalog::{Destination, Experience, HeroImage, Package, Testimonial, Trip};
pub use order::{DuplicateKey, ExistingOrder, Order, OrderDraft, OrderStatus, ParseStatusError, SourcePage};
pub use pricing::{NewPricingTier, PricingTarget, PricingTier, TierPatch, TierRecord, DEFAULT_CURRENCY};
