/// Unique identifier for a rigid object or dye pack in the world.
/// Ids start at 1 and are never reused, so 0 never names a live object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);
