use url::Url;

/// 瀏覽器網址列與歷史紀錄的最小模型。
/// 列表頁固定擁有一筆紀錄，導向其他頁面只會在其後新增。
#[derive(Debug, Clone)]
pub struct Location {
    history: Vec<Url>,
    listing: usize,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Self {
            history: vec![url],
            listing: 0,
        }
    }

    pub fn current(&self) -> &Url {
        // history 永遠至少有一筆
        &self.history[self.history.len() - 1]
    }

    /// 列表頁自己的那筆紀錄
    pub fn listing(&self) -> &Url {
        &self.history[self.listing]
    }

    /// 取代列表頁的紀錄，不新增歷史；已導向的詳細頁紀錄不受影響
    pub fn replace_state(&mut self, url: Url) {
        self.history[self.listing] = url;
    }

    /// 導向新頁面，新增一筆歷史
    pub fn push_state(&mut self, url: Url) {
        self.history.push(url);
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
