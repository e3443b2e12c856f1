use crate::config::Theme;

pub const TOXIC_CLASS: &str = "toxscan-toxic";
pub const MEDIUM_CLASS: &str = "toxscan-medium";
pub const SAFE_CLASS: &str = "toxscan-safe";

pub const BADGE_ID: &str = "toxscan-badge";
pub const TOOLTIP_ID: &str = "toxscan-floating-tooltip";
pub const OVERLAY_ID: &str = "toxscan-modal-overlay";
pub const MODAL_ID: &str = "toxscan-modal";
pub const STYLE_ID: &str = "toxscan-styles";

pub const TOOLTIP_ATTR: &str = "data-toxscan-tooltip";
pub const COLOR_ATTR: &str = "data-toxscan-color";
pub const BORDER_ATTR: &str = "data-toxscan-border";
pub const INDEX_ATTR: &str = "data-toxscan-index";
/// Report rows reference highlighted elements through this attribute so a
/// row click can scroll back to the element with the matching index.
pub const REF_ATTR: &str = "data-toxscan-ref";

const STYLE_TEMPLATE: &str = r#"
/* Highlights */
.toxscan-toxic {
  outline: 3px solid #ef4444 !important;
  outline-offset: 2px !important;
  background: rgba(239, 68, 68, 0.06) !important;
  border-radius: 4px !important;
  position: relative !important;
  animation: toxscan-glow 2s ease-in-out infinite alternate !important;
  transition: all 0.3s ease !important;
  cursor: pointer !important;
}
@keyframes toxscan-glow {
  from { box-shadow: 0 0 5px rgba(239, 68, 68, 0.3), inset 0 0 5px rgba(239, 68, 68, 0.05); }
  to   { box-shadow: 0 0 15px rgba(239, 68, 68, 0.5), inset 0 0 10px rgba(239, 68, 68, 0.08); }
}
.toxscan-toxic:hover { outline-width: 4px !important; }

.toxscan-medium {
  outline: 3px solid #eab308 !important;
  outline-offset: 2px !important;
  background: rgba(234, 179, 8, 0.06) !important;
  border-radius: 4px !important;
  position: relative !important;
  animation: toxscan-glow-medium 2s ease-in-out infinite alternate !important;
  transition: all 0.3s ease !important;
  cursor: pointer !important;
}
@keyframes toxscan-glow-medium {
  from { box-shadow: 0 0 5px rgba(234, 179, 8, 0.3), inset 0 0 5px rgba(234, 179, 8, 0.05); }
  to   { box-shadow: 0 0 15px rgba(234, 179, 8, 0.5), inset 0 0 10px rgba(234, 179, 8, 0.08); }
}
.toxscan-medium:hover { outline-width: 4px !important; }

.toxscan-safe {
  outline: 3px solid #34d399 !important;
  outline-offset: 2px !important;
  background: rgba(52, 211, 153, 0.06) !important;
  border-radius: 4px !important;
  position: relative !important;
  animation: toxscan-glow-safe 2s ease-in-out infinite alternate !important;
  transition: all 0.3s ease !important;
  cursor: pointer !important;
}
@keyframes toxscan-glow-safe {
  from { box-shadow: 0 0 5px rgba(52, 211, 153, 0.3), inset 0 0 5px rgba(52, 211, 153, 0.05); }
  to   { box-shadow: 0 0 15px rgba(52, 211, 153, 0.5), inset 0 0 10px rgba(52, 211, 153, 0.08); }
}
.toxscan-safe:hover { outline-width: 4px !important; }

/* Floating tooltip */
#toxscan-floating-tooltip {
  position: fixed !important;
  background: __TIP_BG__ !important;
  font-family: 'Inter', -apple-system, sans-serif !important;
  font-size: 11px !important;
  font-weight: 600 !important;
  padding: 6px 12px !important;
  border-radius: 8px !important;
  border: 1px solid transparent !important;
  white-space: nowrap !important;
  pointer-events: none !important;
  z-index: 2147483647 !important;
  box-shadow: 0 4px 12px rgba(0,0,0,0.4) !important;
  opacity: 0;
  transition: opacity 0.15s ease !important;
}

/* Badge */
#toxscan-badge {
  position: fixed !important;
  bottom: 20px !important;
  right: 20px !important;
  background: linear-gradient(135deg, #dc2626, #991b1b) !important;
  color: white !important;
  font-family: 'Inter', -apple-system, sans-serif !important;
  font-size: 13px !important;
  font-weight: 600 !important;
  padding: 10px 18px !important;
  border-radius: 50px !important;
  z-index: 999999 !important;
  box-shadow: 0 4px 20px rgba(220, 38, 38, 0.4) !important;
  cursor: pointer !important;
  transition: all 0.3s ease !important;
  display: flex !important;
  align-items: center !important;
  gap: 8px !important;
  animation: toxscan-slide-in 0.5s ease !important;
}
#toxscan-badge:hover {
  transform: scale(1.05) !important;
  box-shadow: 0 6px 25px rgba(220, 38, 38, 0.5) !important;
}
@keyframes toxscan-slide-in {
  from { opacity: 0; transform: translateY(20px); }
  to   { opacity: 1; transform: translateY(0); }
}
#toxscan-badge .ts-badge-icon { font-size: 16px; }

/* Modal overlay and container */
#toxscan-modal-overlay {
  position: fixed !important;
  inset: 0 !important;
  background: rgba(0, 0, 0, 0.6) !important;
  backdrop-filter: blur(4px) !important;
  z-index: 2147483640 !important;
  opacity: 0;
  transition: opacity 0.3s ease !important;
}
#toxscan-modal-overlay.ts-visible { opacity: 1; }

#toxscan-modal {
  position: fixed !important;
  top: 50% !important;
  left: 50% !important;
  transform: translate(-50%, -50%) scale(0.9) !important;
  width: 480px !important;
  max-height: 85vh !important;
  background: __MODAL_BG__ !important;
  border: 1px solid __MODAL_BORDER__ !important;
  border-radius: 16px !important;
  z-index: 2147483641 !important;
  font-family: 'Inter', -apple-system, sans-serif !important;
  color: __MODAL_FG__ !important;
  box-shadow: 0 25px 60px rgba(0,0,0,0.5) !important;
  opacity: 0;
  transition: opacity 0.3s ease, transform 0.3s ease !important;
  flex-direction: column !important;
  overflow: hidden !important;
}
#toxscan-modal.ts-visible {
  opacity: 1;
  transform: translate(-50%, -50%) scale(1) !important;
}

.ts-modal-header {
  display: flex !important;
  align-items: center !important;
  justify-content: space-between !important;
  padding: 20px 24px 16px !important;
  border-bottom: 1px solid __MODAL_BORDER__ !important;
}
.ts-modal-title {
  font-size: 16px !important;
  font-weight: 700 !important;
  display: flex !important;
  align-items: center !important;
  gap: 8px !important;
}
.ts-modal-close {
  width: 28px !important;
  height: 28px !important;
  border-radius: 8px !important;
  border: none !important;
  background: rgba(128,128,128,0.12) !important;
  color: #94a3b8 !important;
  font-size: 16px !important;
  cursor: pointer !important;
}
.ts-modal-body {
  padding: 20px 24px !important;
  overflow-y: auto !important;
  flex: 1 !important;
}

/* Stat cards */
.ts-stat-row {
  display: grid !important;
  grid-template-columns: repeat(4, 1fr) !important;
  gap: 12px !important;
  margin-bottom: 20px !important;
}
.ts-stat-card {
  background: rgba(128,128,128,0.08) !important;
  border-radius: 12px !important;
  padding: 14px !important;
  text-align: center !important;
}
.ts-stat-number { font-size: 28px !important; font-weight: 800 !important; line-height: 1 !important; }
.ts-stat-label {
  font-size: 11px !important;
  font-weight: 500 !important;
  text-transform: uppercase !important;
  letter-spacing: 0.5px !important;
  color: #94a3b8 !important;
  margin-top: 6px !important;
}
.ts-stat-number.toxic  { color: #f87171 !important; }
.ts-stat-number.medium { color: #fbbf24 !important; }
.ts-stat-number.safe   { color: #34d399 !important; }

/* Category bars */
.ts-section-title {
  font-size: 12px !important;
  font-weight: 600 !important;
  text-transform: uppercase !important;
  letter-spacing: 0.5px !important;
  color: #94a3b8 !important;
  margin-bottom: 12px !important;
}
.ts-category-list { margin-bottom: 20px !important; }
.ts-category-item { display: flex !important; align-items: center !important; gap: 10px !important; margin-bottom: 10px !important; }
.ts-cat-name {
  font-size: 12px !important;
  width: 100px !important;
  flex-shrink: 0 !important;
  text-transform: capitalize !important;
}
.ts-cat-bar-bg {
  flex: 1 !important;
  height: 10px !important;
  background: rgba(128,128,128,0.16) !important;
  border-radius: 5px !important;
  overflow: hidden !important;
}
.ts-cat-bar-fill {
  height: 100% !important;
  border-radius: 5px !important;
  transition: width 0.8s cubic-bezier(0.22, 1, 0.36, 1) !important;
  width: 0;
  min-width: 4px;
}
.ts-cat-count { font-size: 12px !important; font-weight: 700 !important; width: 28px !important; text-align: right !important; }

/* Flagged comment rows */
.ts-comment-item {
  background: rgba(128,128,128,0.06) !important;
  border-radius: 10px !important;
  padding: 12px 14px !important;
  margin-bottom: 8px !important;
  cursor: pointer !important;
  transition: background 0.2s, transform 0.15s !important;
}
.ts-comment-item:hover { background: rgba(128,128,128,0.12) !important; transform: translateX(2px) !important; }
.ts-comment-item.ts-item-toxic  { border-left: 3px solid rgba(248, 113, 113, 0.5) !important; }
.ts-comment-item.ts-item-medium { border-left: 3px solid rgba(251, 191, 36, 0.5) !important; }
.ts-comment-header { display: flex !important; align-items: center !important; justify-content: space-between !important; margin-bottom: 6px !important; }
.ts-comment-severity {
  font-size: 10px !important;
  font-weight: 700 !important;
  text-transform: uppercase !important;
  letter-spacing: 0.5px !important;
  padding: 2px 8px !important;
  border-radius: 4px !important;
}
.ts-comment-severity.toxic  { background: rgba(248, 113, 113, 0.15) !important; color: #f87171 !important; }
.ts-comment-severity.medium { background: rgba(251, 191, 36, 0.15) !important; color: #fbbf24 !important; }
.ts-comment-category { font-size: 11px !important; color: #64748b !important; }
.ts-comment-author {
  font-size: 11px !important;
  font-weight: 600 !important;
  color: #60a5fa !important;
  margin-bottom: 4px !important;
  white-space: nowrap !important;
  overflow: hidden !important;
  text-overflow: ellipsis !important;
}
.ts-comment-text {
  font-size: 13px !important;
  line-height: 1.5 !important;
  display: -webkit-box !important;
  -webkit-line-clamp: 2 !important;
  -webkit-box-orient: vertical !important;
  overflow: hidden !important;
}
"#;

pub fn stylesheet(theme: Theme) -> String {
    let (modal_bg, modal_fg, modal_border, tip_bg) = match theme {
        Theme::Dark => ("#13131a", "#e2e8f0", "rgba(255,255,255,0.08)", "#1f1f2e"),
        Theme::Light => ("#ffffff", "#1e293b", "rgba(0,0,0,0.10)", "#f1f5f9"),
    };
    STYLE_TEMPLATE
        .replace("__MODAL_BG__", modal_bg)
        .replace("__MODAL_FG__", modal_fg)
        .replace("__MODAL_BORDER__", modal_border)
        .replace("__TIP_BG__", tip_bg)
}
