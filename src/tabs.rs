//! Script tabs - one open script per tab, at least one tab always open

use crate::buffer::Buffer;

/// One open script
#[derive(Debug)]
pub struct ScriptTab {
    /// Tab title ("New Tab 3" or the file name)
    pub title: String,
    /// The script text and color state
    pub buffer: Buffer,
    /// First visible line (scroll position)
    pub top_line: usize,
}

impl ScriptTab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            buffer: Buffer::new(),
            top_line: 0,
        }
    }

    /// Title with the unsaved-changes marker
    pub fn display_title(&self) -> String {
        if self.buffer.is_modified() {
            format!("{} *", self.title)
        } else {
            self.title.clone()
        }
    }
}

/// The ordered tab collection and the active tab index
#[derive(Debug)]
pub struct TabStrip {
    tabs: Vec<ScriptTab>,
    current: usize,
    counter: usize,
}

impl TabStrip {
    /// Create a strip with one fresh tab
    pub fn new() -> Self {
        Self {
            tabs: vec![ScriptTab::new("New Tab 1")],
            current: 0,
            counter: 2,
        }
    }

    pub fn tabs(&self) -> &[ScriptTab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &ScriptTab {
        &self.tabs[self.current]
    }

    pub fn current_mut(&mut self) -> &mut ScriptTab {
        &mut self.tabs[self.current]
    }

    /// Open a fresh tab and select it
    pub fn add(&mut self) -> &mut ScriptTab {
        let title = format!("New Tab {}", self.counter);
        self.counter += 1;
        self.tabs.push(ScriptTab::new(title));
        self.current = self.tabs.len() - 1;
        self.current_mut()
    }

    /// Close the active tab
    ///
    /// The last remaining tab is never removed; it is reset to a fresh
    /// script instead.
    pub fn close_current(&mut self) {
        if self.tabs.len() == 1 {
            self.tabs[0] = ScriptTab::new("New Tab 1");
            self.current = 0;
            return;
        }
        self.tabs.remove(self.current);
        self.current = self.current.min(self.tabs.len() - 1);
    }

    /// Select a tab by index; out-of-range is ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Cycle to the next tab
    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.tabs.len();
    }

    /// Cycle to the previous tab
    pub fn prev(&mut self) {
        self.current = (self.current + self.tabs.len() - 1) % self.tabs.len();
    }
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}
