/// The data stored for every state of an automaton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub terminal: bool,
}

impl StateNode {
    pub fn new(terminal: bool) -> Self {
        StateNode { terminal }
    }

    pub fn terminal() -> Self {
        StateNode::new(true)
    }

    pub fn non_terminal() -> Self {
        StateNode::new(false)
    }

    pub fn invert(&self) -> Self {
        StateNode::new(!self.terminal)
    }

    pub fn invert_mut(&mut self) {
        self.terminal = !self.terminal;
    }
}
