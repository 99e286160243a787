pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod visit;

pub use owner::Owner;
pub use pet::Pet;
pub use pet_type::PetType;
pub use visit::Visit;
