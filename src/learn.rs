//! Built-in library of short wellness articles.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub read_time: &'static str,
    pub summary: &'static str,
    /// Paragraphs and list items, in reading order.
    pub body: &'static [&'static str],
}

pub const ARTICLES: [Article; 3] = [
    Article {
        id: 1,
        title: "علم استراحت‌های کوتاه",
        category: "بهره‌وری",
        read_time: "۲ دقیقه",
        summary: "استراحت‌های کوتاه ۱ تا ۵ دقیقه‌ای می‌توانند به طور قابل توجهی هوشیاری ذهنی را بهبود بخشیده و خستگی را کاهش دهند.",
        body: &[
            "مغز انسان برای حفظ تمرکز طولانی‌مدت طراحی نشده است. تحقیقات نشان می‌دهد که پس از ۹۰ دقیقه کار مداوم، کارایی مغز به شدت افت می‌کند. استراحت‌های کوتاه یا \"Micro-breaks\" راه حلی علمی برای این مشکل هستند.",
            "برای جلوگیری از خستگی چشم و ذهن، هر ۲۰ دقیقه، به مدت ۲۰ ثانیه به جسمی در فاصله ۲۰ فوتی (۶ متری) نگاه کنید. این کار باعث استراحت عضلات چشم و بازنشانی تمرکز می‌شود.",
            "کاهش استرس و اضطراب لحظه‌ای",
            "بازیابی گلوکز و اکسیژن در مغز",
            "جلوگیری از دردهای عضلانی ناشی از نشستن ثابت",
        ],
    },
    Article {
        id: 2,
        title: "حرکات کششی پشت میز",
        category: "ارگونومی",
        read_time: "۳ دقیقه",
        summary: "نشستن طولانی جریان خون را کند می‌کند. حرکات ساده کششی می‌توانند تنش‌های فیزیکی انباشته شده را آزاد کنند.",
        body: &[
            "بدن انسان برای تحرک ساخته شده است، اما محیط‌های اداری مدرن ما را به صندلی‌ها زنجیر کرده‌اند. انجام حرکات کششی ساده پشت میز می‌تواند از دردهای مزمن کمر و گردن جلوگیری کند.",
            "صاف بنشینید. گوش راست را به سمت شانه راست نزدیک کنید و ۵ ثانیه نگه دارید. سپس به آرامی سر را به پایین بچرخانید و به سمت چپ ببرید. این کار را ۳ بار تکرار کنید.",
            "شانه‌ها را تا نزدیک گوش‌ها بالا بیاورید، ۵ ثانیه نگه دارید و سپس رها کنید. تصور کنید تمام سنگینی دنیا از روی دوشتان برداشته می‌شود.",
            "برای جلوگیری از سندرم تونل کارپال، مچ دست‌ها را ۱۰ بار در جهت عقربه‌های ساعت و ۱۰ بار خلاف آن بچرخانید.",
        ],
    },
    Article {
        id: 3,
        title: "نوشیدن آب و تمرکز",
        category: "تغذیه",
        read_time: "۱ دقیقه",
        summary: "کم‌آبی دشمن خاموش بهره‌وری است. نوشیدن آب کافی ساده‌ترین راه برای حفظ سطح انرژی و تمرکز در طول روز است.",
        body: &[
            "آیا می‌دانستید حدود ۷۵٪ مغز شما از آب تشکیل شده است؟ وقتی آب کافی به مغز نرسد، \"مه مغزی\" ایجاد می‌شود، پردازش اطلاعات کند شده و تمرکز کردن دشوار می‌شود.",
            "احساس تشنگی زمانی رخ می‌دهد که بدن شما قبلاً دچار کم‌آبی شده است. برای حفظ اوج عملکرد ذهنی، باید پیش از تشنگی آب بنوشید.",
            "به ازای هر فنجان قهوه یا چای، حتماً یک لیوان آب اضافه بنوشید تا تعادل حفظ شود.",
            "همیشه یک بطری آب روی میز و در میدان دید خود داشته باشید.",
            "اگر طعم آب را دوست ندارید، چند برگ نعنا یا برش لیمو به آن اضافه کنید.",
            "نوشیدن آب را به عادت‌های دیگر گره بزنید (مثلاً یک لیوان بعد از هر تماس تلفنی).",
        ],
    },
];

/// Looks up an article by id.
pub fn article(id: u32) -> Option<&'static Article> {
    ARTICLES.iter().find(|a| a.id == id)
}

/// List/detail state of the library screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Library {
    selected: Option<&'static Article>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &'static [Article] {
        &ARTICLES
    }

    pub fn selected(&self) -> Option<&'static Article> {
        self.selected
    }

    /// Opens article `id`. Unknown ids leave the selection unchanged.
    pub fn open(&mut self, id: u32) -> Option<&'static Article> {
        match article(id) {
            Some(found) => {
                self.selected = Some(found);
                Some(found)
            }
            None => {
                debug!("No article with id {}", id);
                None
            }
        }
    }

    /// Returns to the list.
    pub fn back(&mut self) {
        self.selected = None;
    }
}
