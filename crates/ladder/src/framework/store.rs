/// Persistence seam for the encoded share fragment.
///
/// The browser original wrote the fragment straight into the address bar as
/// ambient global state; here the destination is injected so the session
/// service can run against memory, a file, or anything else. One logical
/// writer, last writer wins.
pub trait FragmentStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&self, fragment: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("fragment store unavailable: {0}")]
    Unavailable(String),
}
