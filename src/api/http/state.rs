use crate::services::Recommender;
use crate::store::GraphStore;

pub struct AppState<S: GraphStore> {
    pub engine: Recommender<S>,
}

impl<S: GraphStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<S: GraphStore> AppState<S> {
    pub fn new(engine: Recommender<S>) -> Self {
        Self { engine }
    }
}
