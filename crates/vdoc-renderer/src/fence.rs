//! Code fence detection for the line-based `<tab>` pass.

/// An open fence: its marker character and run length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    /// Parse an opening fence: three or more backticks or tildes.
    fn open(line: &str) -> Option<Self> {
        let line = line.trim_start();
        let marker = line.chars().next().filter(|&c| matches!(c, '`' | '~'))?;
        let len = marker_run(line, marker);
        (len >= 3).then_some(Self { marker, len })
    }

    /// A closing fence repeats the marker at least as often and carries no
    /// info string.
    fn is_closed_by(self, line: &str) -> bool {
        let line = line.trim_start();
        let len = marker_run(line, self.marker);
        len >= self.len && line[len * self.marker.len_utf8()..].trim().is_empty()
    }
}

fn marker_run(line: &str, marker: char) -> usize {
    line.chars().take_while(|&c| c == marker).count()
}

/// Line-by-line view of whether we are inside fenced code.
#[derive(Debug, Default)]
pub(crate) struct FenceScanner {
    open: Option<Fence>,
}

impl FenceScanner {
    /// Account for `line`. An opening line counts as inside, a closing one
    /// does not.
    pub(crate) fn feed(&mut self, line: &str) {
        self.open = match self.open {
            Some(fence) if fence.is_closed_by(line) => None,
            Some(fence) => Some(fence),
            None => Fence::open(line),
        };
    }

    pub(crate) fn inside(&self) -> bool {
        self.open.is_some()
    }
}
