pub mod prelude;

pub mod applications;
pub mod users;

/// A type alias that represents any Entity's internal id field data type.
/// Ids are 25-character nano-ids generated by `entity_api` when a caller
/// does not supply one. Aliased so that it's easy to change the underlying
/// type if necessary.
pub type Id = String;
