use crate::{OutfitItem, Slot, SlotSet};

/// Items shown by the coordination page until a catalogue exists.
pub static DEFAULT_ITEMS: [OutfitItem; 3] = [
    OutfitItem {
        name: "크림 니트",
        description: "오늘 같은 쌀쌀한 날씨에 딱 맞는 따뜻하고 부드러운 니트예요. 심플한 디자인으로 다양한 코디에 활용하기 좋아요.",
        image_url: "https://placehold.co/299x190",
    },
    OutfitItem {
        name: "숏 패딩",
        description: "바람이 부는 날엔 보온이 중요해요. 가벼운 숏패딩으로 활동성도 챙겨보세요.",
        image_url: "https://placehold.co/299x190",
    },
    OutfitItem {
        name: "후드 집업",
        description: "간절기/실내외 온도차가 있을 때 툭 걸치기 좋아요. 레이어드에도 잘 어울려요.",
        image_url: "https://placehold.co/299x190",
    },
];

/// Cycles through a fixed, non-empty item list.
#[derive(Debug, Clone)]
pub struct ItemCarousel {
    items: &'static [OutfitItem],
    index: usize,
}

impl Default for ItemCarousel {
    fn default() -> Self {
        Self { items: &DEFAULT_ITEMS, index: 0 }
    }
}

impl ItemCarousel {
    /// `None` for an empty list.
    pub fn new(items: &'static [OutfitItem]) -> Option<Self> {
        if items.is_empty() { None } else { Some(Self { items, index: 0 }) }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> &'static OutfitItem {
        &self.items[self.index]
    }

    /// Advance by one, wrapping around.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &'static OutfitItem {
        self.index = (self.index + 1) % self.items.len();
        self.current()
    }

    /// `position/total`, 1-based.
    pub fn page_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.items.len())
    }

    pub fn render(&self, slots: &mut SlotSet) {
        let item = self.current();
        slots.set_image(Slot::ItemImg, item.image_url);
        slots.set_text(Slot::ItemName, item.name);
        slots.set_text(Slot::ItemDesc, item.description);
        slots.set_text(Slot::ItemPageText, self.page_label());
    }
}
