//! Display strings in the selected locale.

use sc_protocol::config_models::Locale;
use sc_protocol::stage_models::StageId;

/// Strings that are not tied to a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    AppTitle,
    Waiting,
    Completed,
    Failed,
    GeneratedFiles,
    WebsitePreview,
    Download,
    Terminal,
    Command,
    NoFiles,
    ApiKeyMissing,
}

pub fn label(locale: Locale, label: Label) -> &'static str {
    match (locale, label) {
        (Locale::Ar, Label::AppTitle) => "الخوارزمي - منشئ المواقع الذكي",
        (Locale::En, Label::AppTitle) => "Al-Khwarizmi AI Builder",
        (Locale::Ar, Label::Waiting) => "بانتظار الدور...",
        (Locale::En, Label::Waiting) => "Waiting...",
        (Locale::Ar, Label::Completed) => "اكتمل!",
        (Locale::En, Label::Completed) => "Completed!",
        (Locale::Ar, Label::Failed) => "فشل",
        (Locale::En, Label::Failed) => "Failed",
        (Locale::Ar, Label::GeneratedFiles) => "الملفات المنشأة",
        (Locale::En, Label::GeneratedFiles) => "Generated Files",
        (Locale::Ar, Label::WebsitePreview) => "معاينة الموقع",
        (Locale::En, Label::WebsitePreview) => "Website Preview",
        (Locale::Ar, Label::Download) => "تنزيل الموقع",
        (Locale::En, Label::Download) => "Download Website",
        (Locale::Ar, Label::Terminal) => "منفذ الأوامر",
        (Locale::En, Label::Terminal) => "Command Terminal",
        (Locale::Ar, Label::Command) => "أمر",
        (Locale::En, Label::Command) => "Command",
        (Locale::Ar, Label::NoFiles) => "لا توجد ملفات بعد",
        (Locale::En, Label::NoFiles) => "No files yet",
        (Locale::Ar, Label::ApiKeyMissing) => "مفتاح API مطلوب للمتابعة",
        (Locale::En, Label::ApiKeyMissing) => "API key is required to continue",
    }
}

pub fn stage_title(locale: Locale, stage: StageId) -> &'static str {
    match (locale, stage) {
        (Locale::Ar, StageId::Thinker) => "المُفكر",
        (Locale::Ar, StageId::Planner) => "المُخطط",
        (Locale::Ar, StageId::Coder) => "المُبرمج",
        (Locale::Ar, StageId::Tester) => "المُختبر",
        (Locale::Ar, StageId::Deployer) => "الناشر",
        (Locale::En, StageId::Thinker) => "Thinker",
        (Locale::En, StageId::Planner) => "Planner",
        (Locale::En, StageId::Coder) => "Coder",
        (Locale::En, StageId::Tester) => "Tester",
        (Locale::En, StageId::Deployer) => "Deployer",
    }
}

/// The "working" verb shown on the active card.
pub fn stage_action(locale: Locale, stage: StageId) -> &'static str {
    match (locale, stage) {
        (Locale::Ar, StageId::Thinker) => "يفكر...",
        (Locale::Ar, StageId::Planner) => "يخطط...",
        (Locale::Ar, StageId::Coder) => "يكتب الكود...",
        (Locale::Ar, StageId::Tester) => "يختبر...",
        (Locale::Ar, StageId::Deployer) => "ينشر...",
        (Locale::En, StageId::Thinker) => "Thinking...",
        (Locale::En, StageId::Planner) => "Planning...",
        (Locale::En, StageId::Coder) => "Coding...",
        (Locale::En, StageId::Tester) => "Testing...",
        (Locale::En, StageId::Deployer) => "Deploying...",
    }
}
