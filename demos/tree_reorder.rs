//! A small file tree whose rows can be reordered by drag-and-drop, and that accepts files dropped
//! from the OS.
//!
//! Run with `RUST_LOG=egui_tree_dnd=debug` to follow the drop decisions.

use ahash::AHashMap;
use eframe::egui;
use egui_tree_dnd::{
    apply_drop, begin_node_drag, hide_placeholder_when_idle, DropNode, DropNodeOptions, NodeId,
    NodeModel, PlaceholderState, TreeBehavior, TreeSnapshot, EXTERNAL_FILES_KIND,
};

const ROW_HEIGHT: f32 = 22.0;
const INDENT: f32 = 16.0;

fn main() -> eframe::Result {
    env_logger::init();
    eframe::run_native(
        "Tree reorder",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::<DemoApp>::default())),
    )
}

/// Drops collected while rendering, applied once the frame's tree snapshot is gone.
#[derive(Default)]
struct PendingMoves {
    moves: Vec<(Option<NodeId>, NodeId, usize)>,
}

impl TreeBehavior<()> for PendingMoves {
    fn on_drop(&mut self, dragged: Option<&NodeModel<()>>, target: NodeId, index: usize) {
        self.moves.push((dragged.map(|node| node.id), target, index));
    }
}

struct DemoApp {
    nodes: Vec<NodeModel<()>>,
    next_id: u64,
    options: DropNodeOptions,
    drop_nodes: AHashMap<NodeId, DropNode>,
    placeholder: PlaceholderState,
}

impl Default for DemoApp {
    fn default() -> Self {
        let folder = |id: u64, parent: NodeId, text: &str| {
            NodeModel::new(NodeId::from_u64(id), parent, ())
                .with_droppable(true)
                .with_text(text)
        };
        let file = |id: u64, parent: NodeId, text: &str| {
            NodeModel::new(NodeId::from_u64(id), parent, ()).with_text(text)
        };

        let nodes = vec![
            folder(1, NodeId::ROOT, "src"),
            file(2, NodeId::from_u64(1), "main.rs"),
            file(3, NodeId::from_u64(1), "lib.rs").with_sort_index(1),
            folder(4, NodeId::ROOT, "docs").with_sort_index(1),
            file(5, NodeId::from_u64(4), "guide.md"),
            file(6, NodeId::ROOT, "Cargo.toml").with_sort_index(2),
        ];

        Self {
            nodes,
            next_id: 7,
            options: DropNodeOptions::default().accept(EXTERNAL_FILES_KIND),
            drop_nodes: AHashMap::default(),
            placeholder: PlaceholderState::default(),
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut pending = PendingMoves::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Drag rows to reorder, or drop files from your desktop");
            ui.separator();

            let tree = TreeSnapshot::new(NodeId::ROOT, &self.nodes);
            let mut rows = Rows {
                tree: &tree,
                options: &self.options,
                drop_nodes: &mut self.drop_nodes,
                placeholder: &mut self.placeholder,
                pending: &mut pending,
            };
            rows.show_children(ui, NodeId::ROOT, 0);
        });

        hide_placeholder_when_idle(ctx, &mut self.placeholder);

        for (dragged, target, index) in pending.moves {
            let dragged = match dragged {
                Some(id) => id,
                None => self.add_dropped_file(target),
            };
            if let Err(err) = apply_drop(&mut self.nodes, NodeId::ROOT, dragged, target, index) {
                log::warn!("drop rejected: {err}");
            }
        }
    }
}

impl DemoApp {
    fn add_dropped_file(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId::from_u64(self.next_id);
        self.next_id += 1;
        self.nodes.push(
            NodeModel::new(id, parent, ())
                .with_sort_index(i64::MAX)
                .with_text(format!("dropped file {id}")),
        );
        id
    }
}

struct Rows<'a, 't> {
    tree: &'a TreeSnapshot<'t, ()>,
    options: &'a DropNodeOptions,
    drop_nodes: &'a mut AHashMap<NodeId, DropNode>,
    placeholder: &'a mut PlaceholderState,
    pending: &'a mut PendingMoves,
}

impl Rows<'_, '_> {
    fn show_children(&mut self, ui: &mut egui::Ui, parent: NodeId, depth: usize) {
        let mut count = 0;
        for (index, node) in self.tree.children(parent).enumerate() {
            self.placeholder_line(ui, parent, index, depth);
            self.row(ui, node, depth);
            if node.droppable {
                self.show_children(ui, node.id, depth + 1);
            }
            count = index + 1;
        }
        self.placeholder_line(ui, parent, count, depth);
    }

    fn row(&mut self, ui: &mut egui::Ui, node: &NodeModel<()>, depth: usize) {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), ROW_HEIGHT),
            egui::Sense::drag(),
        );
        if response.drag_started() {
            begin_node_drag(ui.ctx(), node.clone());
        }

        let drop_node = self
            .drop_nodes
            .entry(node.id)
            .or_insert_with(|| DropNode::new(node.id, self.options.clone()));
        drop_node.rebind(node.id, self.options.clone());
        let collected = drop_node.attach(&response, self.tree, self.pending, self.placeholder);

        if collected.is_over {
            ui.painter()
                .rect_filled(rect, 2.0, ui.visuals().widgets.hovered.weak_bg_fill);
        }

        let icon = if node.droppable { "📁" } else { "📄" };
        let indent = depth as f32 * INDENT;
        ui.painter().text(
            rect.left_center() + egui::vec2(4.0 + indent, 0.0),
            egui::Align2::LEFT_CENTER,
            format!("{icon} {}", node.text),
            egui::FontId::proportional(14.0),
            ui.visuals().text_color(),
        );
    }

    fn placeholder_line(&self, ui: &mut egui::Ui, parent: NodeId, index: usize, depth: usize) {
        if !self.placeholder.is_at(parent, index) {
            return;
        }
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 4.0),
            egui::Sense::hover(),
        );
        let indent = depth as f32 * INDENT;
        ui.painter().hline(
            (rect.left() + indent)..=rect.right(),
            rect.center().y,
            egui::Stroke::new(2.0, ui.visuals().selection.bg_fill),
        );
    }
}
