//! Location inside the value being checked.
//!
//! A path is a chain of segments pointing at their parent. Siblings share the
//! same parent chain, so extending never copies what is already there.
//! The empty chain is the root and renders as `$`.
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct Path(Option<Arc<Segment>>);

#[derive(Debug)]
struct Segment {
    parent: Path,
    step: Step,
}

#[derive(Debug)]
enum Step {
    Property(String),
    Index(usize),
}

impl Path {
    pub fn root() -> Self { Self::default() }

    pub fn is_root(&self) -> bool { self.0.is_none() }

    /// `.name` step.
    pub fn property(&self, name: &str) -> Self {
        Path(Some(Arc::new(Segment {
            parent: self.clone(),
            step: Step::Property(name.to_owned()),
        })))
    }

    /// `[idx]` step.
    pub fn index(&self, idx: usize) -> Self {
        Path(Some(Arc::new(Segment {
            parent: self.clone(),
            step: Step::Index(idx),
        })))
    }

    pub fn render(&self) -> String { self.to_string() }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // walk leaf → root, then print root → leaf
        let mut steps: Vec<&Step> = Vec::new();
        let mut cur = self.0.as_deref();
        while let Some(seg) = cur {
            steps.push(&seg.step);
            cur = seg.parent.0.as_deref();
        }
        f.write_str("$")?;
        for step in steps.into_iter().rev() {
            match step {
                Step::Property(name) => write!(f, ".{name}")?,
                Step::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}
