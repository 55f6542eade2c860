mod model;

pub use model::RecordedSession;
