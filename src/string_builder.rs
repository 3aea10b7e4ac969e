//! 替换阶段使用的输出缓冲。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            buf: String::with_capacity(n),
        }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// 写入原文 `text[from..to]`，空区间不做任何事。
    pub(crate) fn write_range(&mut self, text: &str, from: usize, to: usize) {
        if from < to {
            self.buf.push_str(&text[from..to]);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
