use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, NotionId};

/// One node of page content.
///
/// `kind` is a closed set of variants, each carrying only its own payload.
/// Anything the API reports that is not modelled lands in
/// [`BlockKind::Unsupported`] with the raw type tag preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub common: BlockCommon,
    pub kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextBlockContent),
    Heading1(HeadingContent),
    Heading2(HeadingContent),
    Heading3(HeadingContent),
    BulletedListItem(TextBlockContent),
    NumberedListItem(TextBlockContent),
    ToDo(ToDoContent),
    Toggle(TextBlockContent),
    Quote(TextBlockContent),
    Callout(CalloutContent),
    Code(CodeContent),
    Divider,
    Image(MediaContent),
    Video(MediaContent),
    Audio(MediaContent),
    File(MediaContent),
    Pdf(MediaContent),
    Bookmark(LinkContent),
    Embed(LinkContent),
    LinkPreview(LinkPreviewContent),
    Equation(EquationContent),
    Table(TableContent),
    TableRow(TableRowContent),
    TableOfContents,
    Breadcrumb,
    ColumnList,
    Column,
    SyncedBlock,
    ChildPage(ChildResourceContent),
    ChildDatabase(ChildResourceContent),
    Unsupported { kind: String },
}

/// A separate resource referenced from inside a content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildResource {
    Page { reference: NotionId, title: String },
    Database { reference: NotionId, title: String },
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self {
            common: BlockCommon::new(id),
            kind,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.common = self.common.with_children(children);
        self
    }

    pub fn id(&self) -> &BlockId {
        &self.common.id
    }

    pub fn children(&self) -> &[Block] {
        &self.common.children
    }

    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common.children = children;
    }

    /// Whether the API reported descendants that belong to this block's own
    /// content tree. Child pages and databases are leaves; their content is
    /// a separate resource.
    pub fn has_nested_content(&self) -> bool {
        self.common.has_children && self.child_resource().is_none()
    }

    pub fn is_list_item(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::BulletedListItem(_) | BlockKind::NumberedListItem(_) | BlockKind::ToDo(_)
        )
    }

    /// Blocks whose children render one indentation level deeper.
    pub fn indents_children(&self) -> bool {
        self.is_list_item() || matches!(self.kind, BlockKind::Toggle(_) | BlockKind::Callout(_))
    }

    pub fn child_resource(&self) -> Option<ChildResource> {
        let reference = NotionId::from(self.id());
        match &self.kind {
            BlockKind::ChildPage(content) => Some(ChildResource::Page {
                reference,
                title: content.title.clone(),
            }),
            BlockKind::ChildDatabase(content) => Some(ChildResource::Database {
                reference,
                title: content.title.clone(),
            }),
            _ => None,
        }
    }

    /// Get block type name
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Heading1(_) => "heading_1",
            BlockKind::Heading2(_) => "heading_2",
            BlockKind::Heading3(_) => "heading_3",
            BlockKind::BulletedListItem(_) => "bulleted_list_item",
            BlockKind::NumberedListItem(_) => "numbered_list_item",
            BlockKind::ToDo(_) => "to_do",
            BlockKind::Toggle(_) => "toggle",
            BlockKind::Quote(_) => "quote",
            BlockKind::Callout(_) => "callout",
            BlockKind::Code(_) => "code",
            BlockKind::Divider => "divider",
            BlockKind::Image(_) => "image",
            BlockKind::Video(_) => "video",
            BlockKind::Audio(_) => "audio",
            BlockKind::File(_) => "file",
            BlockKind::Pdf(_) => "pdf",
            BlockKind::Bookmark(_) => "bookmark",
            BlockKind::Embed(_) => "embed",
            BlockKind::LinkPreview(_) => "link_preview",
            BlockKind::Equation(_) => "equation",
            BlockKind::Table(_) => "table",
            BlockKind::TableRow(_) => "table_row",
            BlockKind::TableOfContents => "table_of_contents",
            BlockKind::Breadcrumb => "breadcrumb",
            BlockKind::ColumnList => "column_list",
            BlockKind::Column => "column",
            BlockKind::SyncedBlock => "synced_block",
            BlockKind::ChildPage(_) => "child_page",
            BlockKind::ChildDatabase(_) => "child_database",
            BlockKind::Unsupported { kind } => kind,
        }
    }
}

/// Collects every child page and child database reachable in a content
/// tree, in document order, at any nesting depth.
pub fn collect_child_resources(blocks: &[Block]) -> Vec<ChildResource> {
    fn walk(blocks: &[Block], found: &mut Vec<ChildResource>) {
        for block in blocks {
            match block.child_resource() {
                Some(resource) => found.push(resource),
                None => walk(block.children(), found),
            }
        }
    }

    let mut found = Vec::new();
    walk(blocks, &mut found);
    found
}
