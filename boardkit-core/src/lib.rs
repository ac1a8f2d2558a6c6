/// boardkit-core: the board data engine — entity model, mutating board
/// store, geometric drag reorder resolution, and the persistence seam.
/// Rendering, dialogs, and the host editor are external collaborators.
pub mod reorder;
pub mod storage;
pub mod store;
pub mod tasks;
pub mod types;

pub use storage::{DocumentStore, StorageError};
pub use store::{BoardStore, TicketPatch};
pub use types::{BoardData, Column, Project, Settings, Ticket, TicketLocation};
