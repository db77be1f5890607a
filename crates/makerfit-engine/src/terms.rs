//! Bilingual (Korean/English) term expansion tables.
//!
//! Each table maps a phrase fragment to canonical tag tokens. A key applies
//! whenever it is a substring of the normalized input, so "식당 관리" picks up
//! the "식당" entry.

/// Phrase fragment to expansion terms, in declaration order.
pub type TermMap = &'static [(&'static str, &'static [&'static str])];

/// Pain point and goal phrases to domain tags.
pub const PAIN_TAGS: TermMap = &[
    ("장부", &["accounting", "bookkeeping", "finance", "invoicing", "receipt"]),
    ("회계", &["accounting", "bookkeeping", "finance"]),
    ("세금", &["tax", "accounting", "invoicing"]),
    ("영수증", &["receipt", "expense", "accounting"]),
    ("정산", &["settlement", "accounting", "payments"]),
    ("결제", &["payments", "billing", "invoicing"]),
    ("급여", &["payroll", "hr", "salary"]),
    ("payroll", &["payroll", "hr", "salary"]),
    ("근태", &["attendance", "hr", "scheduling"]),
    ("출퇴근", &["attendance", "hr"]),
    ("채용", &["recruiting", "hiring", "hr"]),
    ("재고", &["inventory", "stock", "warehouse"]),
    ("inventory", &["inventory", "stock"]),
    ("주문", &["order", "ecommerce", "inventory"]),
    ("배송", &["shipping", "logistics", "delivery"]),
    ("예약", &["booking", "reservation", "scheduling"]),
    ("일정", &["scheduling", "calendar"]),
    ("스케줄", &["scheduling", "calendar", "shift"]),
    ("고객", &["crm", "customer", "sales"]),
    ("crm", &["crm", "customer", "sales"]),
    ("영업", &["crm", "sales", "pipeline"]),
    ("상담", &["customer-support", "helpdesk", "chat"]),
    ("문의", &["customer-support", "helpdesk"]),
    ("마케팅", &["marketing", "campaign", "email"]),
    ("홍보", &["marketing", "social", "campaign"]),
    ("자동화", &["automation", "workflow", "integration"]),
    ("automation", &["automation", "workflow", "integration"]),
    ("workflow", &["workflow", "automation"]),
    ("반복", &["automation", "workflow"]),
    ("수작업", &["automation", "workflow", "spreadsheet"]),
    ("엑셀", &["spreadsheet", "reporting"]),
    ("보고", &["reporting", "analytics", "dashboard"]),
    ("reporting", &["reporting", "analytics", "dashboard"]),
    ("분석", &["analytics", "reporting", "dashboard"]),
    ("협업", &["collaboration", "communication"]),
    ("소통", &["communication", "collaboration", "chat"]),
    ("프로젝트", &["project-management", "task", "kanban"]),
    ("project", &["project-management", "task"]),
    ("할 일", &["task", "kanban"]),
    ("문서", &["documentation", "wiki", "knowledge-base"]),
    ("계약", &["contract", "e-signature", "documentation"]),
    ("디자인", &["design", "prototyping"]),
];

/// Job title phrases to role tags.
pub const ROLE_TAGS: TermMap = &[
    ("대표", &["founder", "executive", "owner"]),
    ("사장", &["owner", "founder"]),
    ("ceo", &["executive", "founder"]),
    ("founder", &["founder", "executive"]),
    ("운영", &["operations", "ops"]),
    ("operations", &["operations", "ops"]),
    ("매니저", &["manager", "operations"]),
    ("manager", &["manager"]),
    ("팀장", &["manager", "team-lead"]),
    ("마케터", &["marketing", "marketer"]),
    ("마케팅", &["marketing", "marketer"]),
    ("marketing", &["marketing", "marketer"]),
    ("영업", &["sales"]),
    ("sales", &["sales"]),
    ("개발", &["developer", "engineering"]),
    ("developer", &["developer", "engineering"]),
    ("engineer", &["developer", "engineering"]),
    ("디자이너", &["designer", "design"]),
    ("designer", &["designer", "design"]),
    ("인사", &["hr", "people"]),
    ("회계", &["finance", "accounting"]),
    ("재무", &["finance", "accounting"]),
    ("finance", &["finance", "accounting"]),
    ("accountant", &["finance", "accounting"]),
    ("기획", &["product", "planner"]),
    ("product", &["product"]),
    ("상담", &["customer-support"]),
    ("support", &["customer-support"]),
];

/// Industry phrases to industry tags.
pub const INDUSTRY_TAGS: TermMap = &[
    ("식당", &["restaurant", "food", "hospitality"]),
    ("음식", &["restaurant", "food"]),
    ("카페", &["cafe", "food", "hospitality"]),
    ("restaurant", &["restaurant", "food", "hospitality"]),
    ("병원", &["healthcare", "clinic", "medical"]),
    ("의원", &["healthcare", "clinic"]),
    ("clinic", &["healthcare", "clinic"]),
    ("쇼핑몰", &["ecommerce", "retail", "online-store"]),
    ("이커머스", &["ecommerce", "retail"]),
    ("ecommerce", &["ecommerce", "retail"]),
    ("소매", &["retail", "store"]),
    ("retail", &["retail"]),
    ("제조", &["manufacturing", "factory"]),
    ("교육", &["education", "academy"]),
    ("학원", &["education", "academy"]),
    ("saas", &["saas", "software", "b2b"]),
    ("소프트웨어", &["software", "saas"]),
    ("부동산", &["real-estate", "property"]),
    ("물류", &["logistics", "shipping"]),
    ("미용", &["beauty", "salon"]),
    ("뷰티", &["beauty", "salon"]),
    ("건설", &["construction"]),
    ("에이전시", &["agency", "creative"]),
    ("agency", &["agency", "creative"]),
    ("법률", &["legal"]),
];

/// Trim and lower-case a free-text value.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Expand one value into `[normalized value, ...mapped terms]`.
///
/// Terms are appended for every key contained in the normalized value, in
/// table order. Blank input expands to nothing.
#[must_use]
pub fn expand_mapped_signals(value: &str, mapping: TermMap) -> Vec<String> {
    let normalized = normalize(value);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut signals = vec![normalized.clone()];
    signals.extend(mapped_terms(&normalized, mapping));
    signals
}

/// Concatenation of [`expand_mapped_signals`] over every element.
#[must_use]
pub fn expand_mapped_signals_from_list<S: AsRef<str>>(
    values: &[S],
    mapping: TermMap,
) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| expand_mapped_signals(value.as_ref(), mapping))
        .collect()
}

/// Only the mapped terms for an already-normalized value, without the value itself.
pub(crate) fn mapped_terms(normalized: &str, mapping: TermMap) -> Vec<String> {
    mapping
        .iter()
        .filter(|(key, _)| normalized.contains(key))
        .flat_map(|(_, terms)| terms.iter().map(|term| (*term).to_string()))
        .collect()
}
