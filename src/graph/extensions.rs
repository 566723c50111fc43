use crate::graph::{amplify::Amplify, node::GraphNode};

/// Fluent combinators for building tone graphs.
///
/// ```ignore
/// let tone = OscNode::sine().amplify(EnvNode::tone(0.02, 0.6, 0.25));
/// ```
pub trait NodeExt: GraphNode + Sized {
    fn amplify<M: GraphNode>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }
}

impl<T: GraphNode> NodeExt for T {}
