/// How a link attaches to its two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    StartToStart,
    FinishToStart,
    FinishToFinish,
}

/// A directed visual connector between two tasks. Links are drawn
/// annotations only; they never move tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link<T> {
    pub from: T,
    pub to: T,
    pub kind: LinkType,
}

impl<T> Link<T> {
    pub fn new(from: T, to: T, kind: LinkType) -> Self {
        Self { from, to, kind }
    }

    pub fn involves(&self, task: &T) -> bool
    where
        T: PartialEq,
    {
        self.from == *task || self.to == *task
    }
}

/// Storage for the links shown by a chart. Mutators default to no-ops.
pub trait LinkModel<T> {
    fn link_count(&self) -> usize;

    fn link_at(&self, index: usize) -> Option<&Link<T>>;

    fn add_link(&mut self, _link: Link<T>) {}

    fn remove_link(&mut self, _link: &Link<T>) {}
}

#[derive(Debug, Clone)]
pub struct BasicLinkModel<T> {
    links: Vec<Link<T>>,
}

impl<T> Default for BasicLinkModel<T> {
    fn default() -> Self {
        Self { links: Vec::new() }
    }
}

impl<T: PartialEq> BasicLinkModel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&mut self, from: T, to: T, kind: LinkType) {
        self.add_link(Link::new(from, to, kind));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link<T>> {
        self.links.iter()
    }
}

impl<T: PartialEq> LinkModel<T> for BasicLinkModel<T> {
    fn link_count(&self) -> usize {
        self.links.len()
    }

    fn link_at(&self, index: usize) -> Option<&Link<T>> {
        self.links.get(index)
    }

    fn add_link(&mut self, link: Link<T>) {
        if !self.links.contains(&link) {
            self.links.push(link);
        }
    }

    fn remove_link(&mut self, link: &Link<T>) {
        if let Some(pos) = self.links.iter().position(|l| l == link) {
            self.links.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_compare_by_value() {
        assert_eq!(
            Link::new(1, 2, LinkType::FinishToStart),
            Link::new(1, 2, LinkType::FinishToStart)
        );
        assert_ne!(
            Link::new(1, 2, LinkType::FinishToStart),
            Link::new(1, 2, LinkType::StartToStart)
        );
    }

    #[test]
    fn basic_model_ignores_duplicates_and_removes_by_value() {
        let mut model = BasicLinkModel::new();
        model.link(1, 2, LinkType::FinishToStart);
        model.link(1, 2, LinkType::FinishToStart);
        model.link(2, 3, LinkType::FinishToFinish);
        assert_eq!(model.link_count(), 2);

        model.remove_link(&Link::new(1, 2, LinkType::FinishToStart));
        assert_eq!(model.link_count(), 1);
        assert_eq!(model.link_at(0).map(|l| l.kind), Some(LinkType::FinishToFinish));
        assert!(model.link_at(1).is_none());
    }
}
