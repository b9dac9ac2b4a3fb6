//! Session-only notification centre.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Reminder,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
    /// Human-readable relative time, e.g. "۱۰ دقیقه پیش".
    pub time: String,
    pub kind: NotificationKind,
}

/// Notifications shown in the dashboard bell. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    /// The notifications a session starts with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Notification {
                id: 1,
                title: "وقت مدیتیشن".to_string(),
                message: "جلسه تمرین تنفس روزانه خود را فراموش نکنید.".to_string(),
                time: "۱۰ دقیقه پیش".to_string(),
                kind: NotificationKind::Reminder,
            },
            Notification {
                id: 2,
                title: "ثبت حال روزانه".to_string(),
                message: "امروز چطور گذشت؟ احساسات خود را ثبت کنید.".to_string(),
                time: "۲ ساعت پیش".to_string(),
                kind: NotificationKind::Info,
            },
            Notification {
                id: 3,
                title: "تبریک!".to_string(),
                message: "شما ۳ روز متوالی وضعیت خود را ثبت کردید.".to_string(),
                time: "دیروز".to_string(),
                kind: NotificationKind::Success,
            },
        ])
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dismisses one notification. Unknown ids are ignored.
    pub fn clear(&mut self, id: u32) {
        self.items.retain(|n| n.id != id);
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
    }
}
