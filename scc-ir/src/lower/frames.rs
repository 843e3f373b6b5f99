//! Loop frames

use scc_common::LabelId;

/// Jump targets a loop exposes to the statements it encloses.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoopFrame {
    /// Block a `break` jumps to: the code after the loop.
    pub(crate) next: LabelId,
    /// Block a `continue` jumps to: the increment block of a `for` when
    /// one exists, otherwise the loop header.
    pub(crate) continue_target: LabelId,
}

/// Stack of active loops, innermost last.
#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    frames: Vec<LoopFrame>,
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        FrameStack::default()
    }

    pub(crate) fn push(&mut self, frame: LoopFrame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    /// The innermost enclosing loop, if any.
    pub(crate) fn innermost(&self) -> Option<LoopFrame> {
        self.frames.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_tracks_the_stack() {
        let mut frames = FrameStack::new();
        assert!(frames.innermost().is_none());

        frames.push(LoopFrame {
            next: 1,
            continue_target: 2,
        });
        frames.push(LoopFrame {
            next: 5,
            continue_target: 6,
        });
        assert_eq!(frames.innermost().map(|f| f.next), Some(5));

        frames.pop();
        assert_eq!(frames.innermost().map(|f| f.continue_target), Some(2));
        frames.pop();
        assert!(frames.innermost().is_none());
    }
}
