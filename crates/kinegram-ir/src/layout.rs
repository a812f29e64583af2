use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::context::SceneContext;
use crate::shape::{ElementId, ShapeDescriptor};
use kinegram_core::error::ensure_positive;
use kinegram_core::{Bounds, Direction, ElementKind, KinegramError, KinegramResult, Point2D, Size2D};

/// Axis along which children are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Left to right.
    Row,
    /// Top to bottom.
    Column,
    /// Row-major grid of uniform cells.
    Grid { columns: usize },
}

/// Cross-axis alignment (row, column) or in-cell alignment (grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Tops for rows, left edges for columns, top-left corner for grid cells.
    Start,
    #[default]
    Center,
    End,
}

/// How a layout node arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutDirective {
    pub arrangement: Arrangement,
    pub spacing: f64,
    pub alignment: Alignment,
    pub reversed: bool,
    /// Where the arranged bounding box is centred.
    pub anchor: Point2D,
}

impl LayoutDirective {
    pub fn new(arrangement: Arrangement, spacing: f64) -> Self {
        Self {
            arrangement,
            spacing,
            alignment: Alignment::Center,
            reversed: false,
            anchor: Point2D::zero(),
        }
    }

    pub fn row(spacing: f64) -> Self {
        Self::new(Arrangement::Row, spacing)
    }

    pub fn column(spacing: f64) -> Self {
        Self::new(Arrangement::Column, spacing)
    }

    pub fn grid(columns: usize, spacing: f64) -> Self {
        Self::new(Arrangement::Grid { columns }, spacing)
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Walk the main axis the other way.
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    pub fn at(mut self, anchor: Point2D) -> Self {
        self.anchor = anchor;
        self
    }
}

/// A child of a layout node: a primitive or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutChild {
    Shape(ShapeDescriptor),
    Node(LayoutNode),
}

impl LayoutChild {
    pub fn id(&self) -> &ElementId {
        match self {
            LayoutChild::Shape(s) => s.id(),
            LayoutChild::Node(n) => n.id(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            LayoutChild::Shape(s) => s.bounds(),
            LayoutChild::Node(n) => n.bounds(),
        }
    }

    pub fn translated(self, offset: Point2D) -> LayoutChild {
        match self {
            LayoutChild::Shape(s) => LayoutChild::Shape(s.shifted(offset)),
            LayoutChild::Node(n) => LayoutChild::Node(n.translated(offset)),
        }
    }

    /// Move so the bounding-box centre lands on `target`.
    pub fn moved_to(self, target: Point2D) -> LayoutChild {
        let offset = target - self.bounds().center();
        self.translated(offset)
    }

    fn scaled_about(self, factor: f64, pivot: Point2D) -> KinegramResult<LayoutChild> {
        match self {
            LayoutChild::Shape(s) => {
                let center = s.position();
                let target = pivot + (center - pivot) * factor;
                Ok(LayoutChild::Shape(s.scaled(factor)?.with_position(target)))
            }
            LayoutChild::Node(n) => Ok(LayoutChild::Node(n.scaled_about(factor, pivot)?)),
        }
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a ElementId>) {
        out.push(self.id());
        if let LayoutChild::Node(n) = self {
            for child in &n.children {
                child.collect_ids(out);
            }
        }
    }
}

impl From<ShapeDescriptor> for LayoutChild {
    fn from(shape: ShapeDescriptor) -> Self {
        LayoutChild::Shape(shape)
    }
}

impl From<LayoutNode> for LayoutChild {
    fn from(node: LayoutNode) -> Self {
        LayoutChild::Node(node)
    }
}

/// Borrowed view of any element in a layout tree.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Shape(&'a ShapeDescriptor),
    Node(&'a LayoutNode),
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> &'a ElementId {
        match self {
            ElementRef::Shape(s) => s.id(),
            ElementRef::Node(n) => n.id(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            ElementRef::Shape(s) => s.bounds(),
            ElementRef::Node(n) => n.bounds(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Shape(s) => s.kind().element_kind(),
            ElementRef::Node(_) => ElementKind::Group,
        }
    }
}

/// A named group of positioned children with a cached bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    id: ElementId,
    directive: Option<LayoutDirective>,
    children: Vec<LayoutChild>,
    bounds: Bounds,
}

impl LayoutNode {
    /// A node with no children and zero-size bounds at `at`.
    pub fn empty(id: impl Into<ElementId>, at: Point2D) -> Self {
        Self {
            id: id.into(),
            directive: None,
            children: Vec::new(),
            bounds: Bounds::point(at),
        }
    }

    /// Group children without moving them. Bounds are the union of theirs.
    pub fn group(id: impl Into<ElementId>, children: Vec<LayoutChild>) -> KinegramResult<Self> {
        let id = id.into();
        ensure_unique_ids(&id, &children)?;
        let bounds = union_bounds(&children).unwrap_or_else(|| Bounds::point(Point2D::zero()));
        Ok(Self {
            id,
            directive: None,
            children,
            bounds,
        })
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn directive(&self) -> Option<&LayoutDirective> {
        self.directive.as_ref()
    }

    pub fn children(&self) -> &[LayoutChild] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&LayoutChild> {
        self.children.get(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn center(&self) -> Point2D {
        self.bounds.center()
    }

    pub fn size(&self) -> Size2D {
        self.bounds.size()
    }

    pub fn into_children(self) -> Vec<LayoutChild> {
        self.children
    }

    pub fn translated(self, offset: Point2D) -> LayoutNode {
        LayoutNode {
            id: self.id,
            directive: self.directive.map(|d| d.at(d.anchor + offset)),
            children: self
                .children
                .into_iter()
                .map(|c| c.translated(offset))
                .collect(),
            bounds: self.bounds.translate(offset),
        }
    }

    /// Move so the bounding-box centre lands on `target`.
    pub fn moved_to(self, target: Point2D) -> LayoutNode {
        let offset = target - self.center();
        self.translated(offset)
    }

    /// Place this node beside `target` in `direction`, leaving a gap of `buff`.
    pub fn next_to(self, target: &Bounds, direction: Direction, buff: f64) -> LayoutNode {
        let offset = next_to_offset(&self.bounds, target, direction, buff);
        self.translated(offset)
    }

    /// Scale every child about the node centre.
    pub fn scaled(self, factor: f64) -> KinegramResult<LayoutNode> {
        let pivot = self.center();
        self.scaled_about(factor, pivot)
    }

    fn scaled_about(self, factor: f64, pivot: Point2D) -> KinegramResult<LayoutNode> {
        let factor = ensure_positive("scale", factor)?;
        let children = self
            .children
            .into_iter()
            .map(|c| c.scaled_about(factor, pivot))
            .collect::<KinegramResult<Vec<_>>>()?;
        let bounds = union_bounds(&children).unwrap_or_else(|| {
            Bounds::point(pivot + (self.bounds.center() - pivot) * factor)
        });
        Ok(LayoutNode {
            id: self.id,
            directive: self.directive,
            children,
            bounds,
        })
    }

    /// Look up an element anywhere in the subtree, including this node.
    pub fn find(&self, id: &str) -> Option<ElementRef<'_>> {
        if self.id.as_str() == id {
            return Some(ElementRef::Node(self));
        }
        for child in &self.children {
            match child {
                LayoutChild::Shape(s) if s.id().as_str() == id => {
                    return Some(ElementRef::Shape(s));
                }
                LayoutChild::Node(n) => {
                    if let Some(found) = n.find(id) {
                        return Some(found);
                    }
                }
                LayoutChild::Shape(_) => {}
            }
        }
        None
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Every shape in the subtree, in paint order (depth-first, declaration order).
    pub fn shapes(&self) -> Vec<&ShapeDescriptor> {
        let mut out = Vec::new();
        self.collect_shapes(&mut out);
        out
    }

    fn collect_shapes<'a>(&'a self, out: &mut Vec<&'a ShapeDescriptor>) {
        for child in &self.children {
            match child {
                LayoutChild::Shape(s) => out.push(s),
                LayoutChild::Node(n) => n.collect_shapes(out),
            }
        }
    }

    /// Every nested node in the subtree, this one first.
    pub fn nodes(&self) -> Vec<&LayoutNode> {
        let mut out = vec![self];
        for child in &self.children {
            if let LayoutChild::Node(n) = child {
                out.extend(n.nodes());
            }
        }
        out
    }

    /// All element ids in the subtree, this node included, in tree order.
    pub fn ids(&self) -> Vec<&ElementId> {
        let mut out = vec![&self.id];
        for child in &self.children {
            child.collect_ids(&mut out);
        }
        out
    }
}

fn union_bounds(children: &[LayoutChild]) -> Option<Bounds> {
    children
        .iter()
        .map(LayoutChild::bounds)
        .reduce(|acc, b| acc.union(&b))
}

fn ensure_unique_ids(id: &ElementId, children: &[LayoutChild]) -> KinegramResult<()> {
    let mut all = vec![id];
    for child in children {
        child.collect_ids(&mut all);
    }
    let mut seen = HashSet::new();
    for id in all {
        if !seen.insert(id) {
            return Err(KinegramError::validation(
                "id",
                format!("duplicate element id '{}'", id),
            ));
        }
    }
    Ok(())
}

fn next_to_offset(own: &Bounds, target: &Bounds, direction: Direction, buff: f64) -> Point2D {
    let anchor = target.edge(direction) + direction.vector() * buff;
    anchor - own.edge(direction.opposite())
}

/// Arranges children according to a directive and places groups relative to
/// the scene frame.
pub struct LayoutComposer<'a> {
    ctx: &'a SceneContext,
}

impl<'a> LayoutComposer<'a> {
    pub fn new(ctx: &'a SceneContext) -> Self {
        Self { ctx }
    }

    /// Centre positions for children of the given extents, before the
    /// arrangement is centred on the anchor.
    ///
    /// Rows start at x = 0 and grow rightwards, columns start at y = 0 and
    /// grow downwards.
    pub fn positions(
        &self,
        extents: &[Size2D],
        directive: &LayoutDirective,
    ) -> KinegramResult<Vec<Point2D>> {
        let spacing = directive.spacing;
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(KinegramError::Layout(format!(
                "spacing must be a finite non-negative number, got {}",
                spacing
            )));
        }
        if extents.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(bad) = extents
            .iter()
            .find(|s| !s.width.is_finite() || !s.height.is_finite())
        {
            return Err(KinegramError::Layout(format!(
                "child extent {}x{} is not finite",
                bad.width, bad.height
            )));
        }
        if spacing > 0.0 && extents.iter().all(Size2D::is_zero) {
            return Err(KinegramError::Layout(format!(
                "cannot space {} zero-size children by {}",
                extents.len(),
                spacing
            )));
        }

        let max_w = extents.iter().map(|s| s.width).fold(0.0, f64::max);
        let max_h = extents.iter().map(|s| s.height).fold(0.0, f64::max);
        let align = |slack: f64| match directive.alignment {
            Alignment::Start => -slack / 2.0,
            Alignment::Center => 0.0,
            Alignment::End => slack / 2.0,
        };

        let mut points = Vec::with_capacity(extents.len());
        match directive.arrangement {
            Arrangement::Row => {
                let mut x = 0.0;
                for (i, size) in extents.iter().enumerate() {
                    if i > 0 {
                        x += extents[i - 1].width / 2.0 + spacing + size.width / 2.0;
                    }
                    // y grows upwards, so "start" (top) is a positive shift.
                    points.push(Point2D::new(x, -align(max_h - size.height)));
                }
            }
            Arrangement::Column => {
                let mut y = 0.0;
                for (i, size) in extents.iter().enumerate() {
                    if i > 0 {
                        y -= extents[i - 1].height / 2.0 + spacing + size.height / 2.0;
                    }
                    points.push(Point2D::new(align(max_w - size.width), y));
                }
            }
            Arrangement::Grid { columns } => {
                if columns == 0 {
                    return Err(KinegramError::Layout(format!(
                        "grid with zero columns cannot hold {} children",
                        extents.len()
                    )));
                }
                for (i, size) in extents.iter().enumerate() {
                    let col = (i % columns) as f64;
                    let row = (i / columns) as f64;
                    let cell = Point2D::new(col * (max_w + spacing), -row * (max_h + spacing));
                    points.push(Point2D::new(
                        cell.x + align(max_w - size.width),
                        cell.y - align(max_h - size.height),
                    ));
                }
            }
        }

        if directive.reversed {
            let flip_x = matches!(directive.arrangement, Arrangement::Row | Arrangement::Grid { .. });
            let flip_y = matches!(directive.arrangement, Arrangement::Column | Arrangement::Grid { .. });
            for p in &mut points {
                if flip_x {
                    p.x = -p.x;
                }
                if flip_y {
                    p.y = -p.y;
                }
            }
        }

        tracing::debug!(
            arrangement = ?directive.arrangement,
            count = extents.len(),
            spacing,
            "computed layout positions"
        );
        Ok(points)
    }

    /// Arrange children per `directive` and centre the result on its anchor.
    pub fn arrange(
        &self,
        id: impl Into<ElementId>,
        children: Vec<LayoutChild>,
        directive: LayoutDirective,
    ) -> KinegramResult<LayoutNode> {
        let id = id.into();
        ensure_unique_ids(&id, &children)?;
        let extents: Vec<Size2D> = children.iter().map(|c| c.bounds().size()).collect();
        let points = self.positions(&extents, &directive)?;

        if children.is_empty() {
            return Ok(LayoutNode {
                id,
                directive: Some(directive),
                children,
                bounds: Bounds::point(directive.anchor),
            });
        }

        let placed: Vec<LayoutChild> = children
            .into_iter()
            .zip(points)
            .map(|(child, p)| child.moved_to(p))
            .collect();
        let union = union_bounds(&placed).unwrap_or_else(|| Bounds::point(Point2D::zero()));
        let offset = directive.anchor - union.center();
        let children: Vec<LayoutChild> = placed.into_iter().map(|c| c.translated(offset)).collect();
        let bounds = union.translate(offset);

        tracing::debug!(
            node = %id,
            width = bounds.width(),
            height = bounds.height(),
            "arranged layout node"
        );
        Ok(LayoutNode {
            id,
            directive: Some(directive),
            children,
            bounds,
        })
    }

    /// Arrange in a row with the context's default gap.
    pub fn row(
        &self,
        id: impl Into<ElementId>,
        children: Vec<LayoutChild>,
    ) -> KinegramResult<LayoutNode> {
        self.arrange(id, children, LayoutDirective::row(self.ctx.default_buff))
    }

    /// Arrange in a column with the context's default gap.
    pub fn column(
        &self,
        id: impl Into<ElementId>,
        children: Vec<LayoutChild>,
    ) -> KinegramResult<LayoutNode> {
        self.arrange(id, children, LayoutDirective::column(self.ctx.default_buff))
    }

    /// Push a node against the frame border in `direction`, keeping `buff`
    /// (default: the context edge buffer) clear. Diagonals move to a corner.
    pub fn to_edge(&self, node: LayoutNode, direction: Direction, buff: Option<f64>) -> LayoutNode {
        let offset = self.to_edge_offset(&node.bounds(), direction, buff);
        node.translated(offset)
    }

    /// Shape counterpart of [`LayoutComposer::to_edge`].
    pub fn shape_to_edge(
        &self,
        shape: ShapeDescriptor,
        direction: Direction,
        buff: Option<f64>,
    ) -> ShapeDescriptor {
        let offset = self.to_edge_offset(&shape.bounds(), direction, buff);
        shape.shifted(offset)
    }

    fn to_edge_offset(&self, bounds: &Bounds, direction: Direction, buff: Option<f64>) -> Point2D {
        let buff = buff.unwrap_or(self.ctx.edge_buff);
        let v = direction.vector();
        let current = bounds.edge(direction);
        let mut offset = Point2D::zero();
        if v.x != 0.0 {
            offset.x = v.x * (self.ctx.frame.width / 2.0 - buff) - current.x;
        }
        if v.y != 0.0 {
            offset.y = v.y * (self.ctx.frame.height / 2.0 - buff) - current.y;
        }
        offset
    }

    /// Place a shape beside `target` in `direction`; `buff` defaults to the
    /// context gap.
    pub fn shape_next_to(
        &self,
        shape: ShapeDescriptor,
        target: &Bounds,
        direction: Direction,
        buff: Option<f64>,
    ) -> ShapeDescriptor {
        let buff = buff.unwrap_or(self.ctx.default_buff);
        let offset = next_to_offset(&shape.bounds(), target, direction, buff);
        shape.shifted(offset)
    }

    pub fn node_next_to(
        &self,
        node: LayoutNode,
        target: &Bounds,
        direction: Direction,
        buff: Option<f64>,
    ) -> LayoutNode {
        node.next_to(target, direction, buff.unwrap_or(self.ctx.default_buff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ShapeFactory, Style};

    fn squares(ctx: &SceneContext, n: usize, side: f64) -> Vec<LayoutChild> {
        let f = ShapeFactory::new(ctx);
        (0..n)
            .map(|i| {
                f.square(format!("s{}", i), side, Style::new())
                    .unwrap()
                    .into()
            })
            .collect()
    }

    #[test]
    fn test_row_positions_example() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let extents = vec![Size2D::new(1.0, 1.0); 5];
        let points = composer
            .positions(&extents, &LayoutDirective::row(0.5))
            .unwrap();
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.5, 3.0, 4.5, 6.0]);
        assert!(points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_row_is_centred_on_anchor() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let node = composer
            .arrange("row", squares(&ctx, 5, 1.0), LayoutDirective::row(0.5))
            .unwrap();
        assert!((node.center().x).abs() < 1e-12);
        assert!((node.size().width - 7.0).abs() < 1e-12);
        let first = node.child(0).unwrap().bounds().center();
        assert!((first.x + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_column_walks_down() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let node = composer
            .arrange("col", squares(&ctx, 3, 1.0), LayoutDirective::column(0.25))
            .unwrap();
        let ys: Vec<f64> = node.children().iter().map(|c| c.bounds().center().y).collect();
        assert!(ys[0] > ys[1] && ys[1] > ys[2]);
        assert!((ys[0] - ys[1] - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_reversed_row_walks_left() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let node = composer
            .arrange(
                "row",
                squares(&ctx, 3, 1.0),
                LayoutDirective::row(0.5).reversed(),
            )
            .unwrap();
        let xs: Vec<f64> = node.children().iter().map(|c| c.bounds().center().x).collect();
        assert!(xs[0] > xs[1] && xs[1] > xs[2]);
    }

    #[test]
    fn test_row_start_alignment_aligns_tops() {
        let ctx = SceneContext::default();
        let f = ShapeFactory::new(&ctx);
        let composer = LayoutComposer::new(&ctx);
        let children = vec![
            f.rectangle("tall", 1.0, 3.0, Style::new()).unwrap().into(),
            f.rectangle("short", 1.0, 1.0, Style::new()).unwrap().into(),
        ];
        let node = composer
            .arrange(
                "row",
                children,
                LayoutDirective::row(0.2).with_alignment(Alignment::Start),
            )
            .unwrap();
        let tops: Vec<f64> = node.children().iter().map(|c| c.bounds().max_y).collect();
        assert!((tops[0] - tops[1]).abs() < 1e-12);
    }

    #[test]
    fn test_grid_layout() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let node = composer
            .arrange("grid", squares(&ctx, 6, 1.0), LayoutDirective::grid(3, 0.0))
            .unwrap();
        assert!((node.size().width - 3.0).abs() < 1e-12);
        assert!((node.size().height - 2.0).abs() < 1e-12);
        let c0 = node.child(0).unwrap().bounds().center();
        let c4 = node.child(4).unwrap().bounds().center();
        assert!((c4.x - c0.x - 1.0).abs() < 1e-12);
        assert!((c0.y - c4.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_layout_errors() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let err = composer
            .arrange("r", squares(&ctx, 2, 1.0), LayoutDirective::row(-0.1))
            .unwrap_err();
        assert!(matches!(err, KinegramError::Layout(_)));
        assert!(composer
            .arrange("r", squares(&ctx, 2, 1.0), LayoutDirective::row(f64::NAN))
            .is_err());
        assert!(matches!(
            composer.arrange("g", squares(&ctx, 2, 1.0), LayoutDirective::grid(0, 0.1)),
            Err(KinegramError::Layout(_))
        ));
        assert!(matches!(
            composer.arrange("z", squares(&ctx, 3, 0.0), LayoutDirective::row(0.5)),
            Err(KinegramError::Layout(_))
        ));
        assert!(composer
            .arrange("z", squares(&ctx, 3, 0.0), LayoutDirective::row(0.0))
            .is_ok());
    }

    #[test]
    fn test_empty_arrangement() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let anchor = Point2D::new(1.0, -2.0);
        let node = composer
            .arrange("e", Vec::new(), LayoutDirective::grid(0, 0.3).at(anchor))
            .unwrap();
        assert!(node.is_empty());
        assert!(node.size().is_zero());
        assert_eq!(node.center(), anchor);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let ctx = SceneContext::default();
        let f = ShapeFactory::new(&ctx);
        let composer = LayoutComposer::new(&ctx);
        let a = f.square("dup", 1.0, Style::new()).unwrap();
        let b = f.square("dup", 1.0, Style::new()).unwrap();
        let err = composer
            .arrange("row", vec![a.into(), b.into()], LayoutDirective::row(0.1))
            .unwrap_err();
        assert!(matches!(err, KinegramError::Validation { .. }));
    }

    #[test]
    fn test_next_to_and_to_edge() {
        let ctx = SceneContext::default();
        let f = ShapeFactory::new(&ctx);
        let composer = LayoutComposer::new(&ctx);
        let anchor = f.square("a", 2.0, Style::new()).unwrap();
        let label = f.square("b", 1.0, Style::new()).unwrap();
        let placed = composer.shape_next_to(label, &anchor.bounds(), Direction::Right, Some(0.5));
        assert!((placed.bounds().min_x - 1.5).abs() < 1e-12);
        assert!((placed.position().y).abs() < 1e-12);

        let node = LayoutNode::group("g", vec![placed.into()]).unwrap();
        let top = composer.to_edge(node, Direction::Up, None);
        assert!((top.bounds().max_y - (ctx.frame.height / 2.0 - ctx.edge_buff)).abs() < 1e-12);
        assert!((top.center().x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_find_and_shapes() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let inner = composer
            .arrange("inner", squares(&ctx, 2, 1.0), LayoutDirective::row(0.1))
            .unwrap();
        let f = ShapeFactory::new(&ctx);
        let outer = LayoutNode::group(
            "outer",
            vec![inner.into(), f.circle("c", 0.5, Style::new()).unwrap().into()],
        )
        .unwrap();
        assert!(outer.contains("s1"));
        assert_eq!(outer.find("inner").map(|e| e.kind()), Some(ElementKind::Group));
        assert_eq!(outer.find("c").map(|e| e.kind()), Some(ElementKind::Circle));
        assert!(outer.find("missing").is_none());
        let ids: Vec<&str> = outer.shapes().iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["s0", "s1", "c"]);
        assert_eq!(outer.ids().len(), 5);
    }

    #[test]
    fn test_scaled_node() {
        let ctx = SceneContext::default();
        let composer = LayoutComposer::new(&ctx);
        let node = composer
            .arrange("row", squares(&ctx, 2, 1.0), LayoutDirective::row(1.0))
            .unwrap();
        let scaled = node.scaled(2.0).unwrap();
        assert!((scaled.size().width - 6.0).abs() < 1e-12);
        assert!((scaled.center().x).abs() < 1e-12);
    }
}
