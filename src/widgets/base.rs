use crate::widgets::traits::RenderContext;

#[derive(Debug, Clone)]
pub struct InputBase {
    id: String,
    label: String,
}

impl InputBase {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        ctx.is_focused(&self.id)
    }
}

#[derive(Debug, Clone)]
pub struct ModalBase {
    id: String,
    label: String,
    visible: bool,
}

impl ModalBase {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            visible: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }
}
