//! HTML for every desktop layer. Pure string builders so the runtime can diff
//! a layer against what it last wrote and only touch the DOM on change.

use std::fmt::Write as _;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::boss::BossDialog;
use crate::flow::Event;
use crate::games::wordle::{KEYBOARD_ROWS, LetterState, MAX_GUESSES, WORD_LEN};
use crate::games::{WordleGame, pacman, pong, tetris};
use crate::meter::PerformanceMeter;
use crate::punishment::{
    EMAIL_LINES, JIRA_COLUMNS, Punishment, PunishmentKind, TEAMS_CHAT, ZOOM_TILE_COUNT, ZOOM_TILES,
};
use crate::stage::Stage;
use crate::{READ_EMAILS, UNREAD_EMAILS};

pub const DESKTOP_ID: &str = "os-desktop";
pub const BOSS_ID: &str = "os-boss";
pub const PUNISH_ID: &str = "os-punish";
pub const TASKBAR_ID: &str = "os-taskbar";
pub const WINDOW_ID: &str = "os-window";
pub const CANVAS_ID: &str = "os-game-canvas";

const CONFETTI_COLORS: [&str; 7] = [
    "#f72585", "#7209b7", "#3a0ca3", "#4361ee", "#4cc9f0", "#f77f00", "#fcbf49",
];
const CONFETTI_PIECES: usize = 50;

const DESKTOP_ICONS: [(&str, &str, &str); 6] = [
    ("🖥️", "My Computer", "#1a6db5"),
    ("🗑️", "Recycle Bin", "#6b7280"),
    ("📁", "My Documents", "#d97706"),
    ("📊", "Sprint_FINAL_v3.xls", "#16a34a"),
    ("💬", "Slack", "#7c3aed"),
    ("📅", "Standup.exe", "#dc2626"),
];

const ZOOM_PARTICIPANTS: [(&str, &str, &str); 4] = [
    ("JD", "John D.", "#4a7c9b"),
    ("SK", "Sarah K.", "#7c4a9b"),
    ("MR", "Mike R.", "#9b6b4a"),
    ("AL", "Amy L.", "#4a9b6b"),
];

/// Injected once into `<head>`.
pub const STYLESHEET: &str = r#"
#os-root { position:fixed; inset:0; overflow:hidden; font-family:Tahoma, 'MS Sans Serif', sans-serif;
  background:linear-gradient(180deg,#3a6ea5 0%,#5a8fd0 60%,#2f8f3a 100%); user-select:none; }
.xp-window { background:#ece9d8; border:2px solid #0a246a; box-shadow:4px 4px 0 rgba(0,0,0,0.35); }
.xp-title-bar { display:flex; justify-content:space-between; align-items:center; padding:3px 6px;
  color:#fff; font-size:12px; font-weight:bold; background:linear-gradient(90deg,#0a246a,#3a6ea5); cursor:grab; }
.xp-title-bar.inactive { background:linear-gradient(90deg,#7a96df,#a6b8e8); }
.xp-body { padding:8px; font-size:12px; color:#111; }
.xp-button, .xp-button-primary { background:#d4d0c8; color:#000; font-size:12px; padding:3px 12px; cursor:pointer;
  border:2px solid; border-color:#fff #808080 #808080 #fff; }
.xp-button-primary { font-weight:bold; }
.xp-close { width:18px; height:18px; background:#d4d0c8; color:#000; border:1px solid #000; font-size:10px; cursor:pointer; }
.tile { width:40px; height:40px; display:flex; align-items:center; justify-content:center; font-weight:bold;
  font-size:20px; border:2px solid #999; background:#fff; }
.tile-correct { background:#16a34a; color:#fff; border-color:#16a34a; }
.tile-present { background:#eab308; color:#fff; border-color:#eab308; }
.tile-absent { background:#6b7280; color:#fff; border-color:#6b7280; }
.key { min-width:26px; height:34px; margin:2px; font-size:11px; font-weight:bold; border:1px solid #888;
  background:#d4d0c8; cursor:pointer; }
.confetti { position:absolute; top:-20px; animation:os-fall 3s linear infinite; }
@keyframes os-fall { to { transform:translateY(110vh) rotate(540deg); } }
@keyframes os-shake { 0%,100% { transform:translateX(0); } 25% { transform:translateX(-4px); } 75% { transform:translateX(4px); } }
"#;

/// Map a `data-action` attribute to a director event.
pub fn action_event(action: &str) -> Option<Event> {
    Some(match action {
        "intro-start" => Event::IntroStart,
        "toggle-skip" => Event::ToggleSkipTutorials,
        "teams-close" => Event::TeamsClose,
        "teams-join" => Event::TeamsJoin,
        "howto-start" => Event::HowToStart,
        "zoom-join" => Event::ZoomJoin,
        "zoom-decline" => Event::ZoomDecline,
        "boss-dismiss" => Event::BossDismiss,
        "boss-alt" => Event::BossAlt,
        "outlook-close" => Event::OutlookClose,
        "restart" => Event::Restart,
        _ => return None,
    })
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything the desktop layer depends on.
pub struct DesktopView<'a> {
    pub stage: Stage,
    pub meter: &'a PerformanceMeter,
    pub skip_tutorials: bool,
    pub punishment_active: bool,
    /// Dragged position of the stage window, if the player moved it.
    pub window_pos: Option<(f64, f64)>,
    pub wordle: Option<&'a WordleGame>,
    pub confetti_seed: u64,
}

pub fn desktop(view: &DesktopView) -> String {
    match view.stage {
        Stage::Intro => return intro_screen(view.skip_tutorials),
        Stage::Fired => return fired_screen(view.confetti_seed),
        Stage::Promoted => return promoted_screen(),
        _ => {}
    }
    let mut html = String::new();
    html.push_str(&meter_panel(view.meter));
    html.push_str(&desktop_icons());
    if !view.punishment_active {
        html.push_str(&procrastination_window());
    }
    if view.stage.is_game_active() {
        html.push_str(
            "<div style='position:fixed; inset:0; background:rgba(0,0,0,0.5); z-index:30;'></div>",
        );
    }
    html.push_str(&stage_window(view));
    html
}

fn stage_window(view: &DesktopView) -> String {
    let stage = view.stage;
    if stage == Stage::Teams {
        return teams_notification();
    }
    if let Some(howto) = stage.howto() {
        let mut body = format!(
            "<div style='display:flex; flex-direction:column; align-items:center; gap:10px; padding:8px;'>\
             <h3 style='margin:0; font-size:13px;'>📖 How to Play: {}</h3><ol style='margin:0; padding-left:20px;'>",
            escape(howto.game_title)
        );
        for line in howto.instructions {
            let _ = write!(body, "<li>{}</li>", escape(line));
        }
        body.push_str("</ol><button class='xp-button-primary' data-action='howto-start'>▶ Start!</button></div>");
        return window(howto.window_title, howto.width, view.window_pos, false, &body);
    }
    match stage {
        Stage::Pingpong => window(
            "Work Avoidance.exe",
            400,
            view.window_pos,
            false,
            &canvas(pong::FIELD_W, pong::FIELD_H, "You vs. Marty Supreme"),
        ),
        Stage::Wordle => {
            let body = view.wordle.map(wordle_board).unwrap_or_default();
            window("Corporate Jargon Decoder", 340, view.window_pos, false, &body)
        }
        Stage::Pacman => window(
            "Outlook Inbox",
            510,
            view.window_pos,
            false,
            &canvas(
                pacman::COLS as f64 * pacman::CELL,
                pacman::ROWS as f64 * pacman::CELL,
                "Eat the 📧 emails. Dodge PM, HR and CEO.",
            ),
        ),
        Stage::Tetris => window(
            "Jira Backlog Refinement",
            470,
            view.window_pos,
            false,
            &canvas(
                tetris::COLS as f64 * tetris::CELL,
                tetris::ROWS as f64 * tetris::CELL,
                "Clear rows to reassign Jiras. Let them stack and they're all yours.",
            ),
        ),
        Stage::Zoom => window("Zoom Meeting", 380, view.window_pos, false, &zoom_invite()),
        Stage::Outlook => window("Outlook - Inbox", 730, view.window_pos, true, &outlook_inbox()),
        _ => String::new(),
    }
}

/// Draggable XP window; `data-drag` marks the title bar as the handle.
fn window(title: &str, width: u32, pos: Option<(f64, f64)>, closable: bool, body: &str) -> String {
    let placement = match pos {
        Some((x, y)) => format!("left:{x}px; top:{y}px;"),
        None => format!("left:calc(50% - {}px); top:18%;", width / 2),
    };
    let close = if closable {
        "<button class='xp-close' data-action='outlook-close'>✕</button>"
    } else {
        ""
    };
    format!(
        "<div id='{WINDOW_ID}' class='xp-window' style='position:fixed; {placement} width:{width}px; z-index:40;'>\
         <div class='xp-title-bar' data-drag='1'><span>{}</span>{close}</div>\
         <div class='xp-body'>{body}</div></div>",
        escape(title)
    )
}

fn canvas(width: f64, height: f64, caption: &str) -> String {
    format!(
        "<div style='display:flex; flex-direction:column; align-items:center; gap:6px;'>\
         <p style='margin:0; font-size:12px; font-weight:bold; text-align:center;'>{}</p>\
         <canvas id='{CANVAS_ID}' width='{width}' height='{height}' style='border:2px solid #808080; background:#111;'></canvas></div>",
        escape(caption)
    )
}

pub fn meter_panel(meter: &PerformanceMeter) -> String {
    const CX: f64 = 130.0;
    const CY: f64 = 115.0;
    const R: f64 = 95.0;
    let rad = meter.needle_angle_deg().to_radians();
    let nx = CX + R * 0.82 * rad.cos();
    let ny = CY - R * 0.82 * rad.sin();
    let status = meter.status();

    let mut ticks = String::new();
    for i in 0..=10 {
        let a = std::f64::consts::PI - (i as f64 / 10.0) * std::f64::consts::PI;
        let _ = write!(
            ticks,
            "<line x1='{:.1}' y1='{:.1}' x2='{:.1}' y2='{:.1}' stroke='hsl(220,10%,50%)' stroke-width='{}'/>",
            CX + (R + 12.0) * a.cos(),
            CY - (R + 12.0) * a.sin(),
            CX + (R + 4.0) * a.cos(),
            CY - (R + 4.0) * a.sin(),
            if i % 5 == 0 { 2 } else { 1 }
        );
    }
    let arc = format!("M {} {CY} A {R} {R} 0 0 1 {} {CY}", CX - R, CX + R);
    format!(
        "<div class='xp-window' style='position:fixed; right:16px; top:16px; width:276px; z-index:50;'>\
         <div class='xp-title-bar' style='cursor:default;'><span>📊 Performance Meter</span></div>\
         <div class='xp-body' style='padding:6px;'>\
         <div style='background:linear-gradient(90deg,hsl(213,72%,44%),hsl(213,50%,62%)); color:#fff; font-size:11px; text-align:center; letter-spacing:1px;'>EMPLOYEE PERFORMANCE TRACKER</div>\
         <svg width='260' height='150' viewBox='0 0 260 150'>\
         <defs><linearGradient id='arcGrad' x1='{x1}' y1='0' x2='{x2}' y2='0' gradientUnits='userSpaceOnUse'>\
         <stop offset='0%' stop-color='hsl(0,65%,48%)'/><stop offset='50%' stop-color='hsl(50,85%,50%)'/><stop offset='100%' stop-color='hsl(120,60%,38%)'/></linearGradient></defs>\
         <path d='{arc}' fill='none' stroke='hsl(220,10%,55%)' stroke-width='22'/>\
         <path d='{arc}' fill='none' stroke='url(#arcGrad)' stroke-width='20'/>{ticks}\
         <line x1='{CX}' y1='{CY}' x2='{nx:.1}' y2='{ny:.1}' stroke='#333' stroke-width='3' stroke-linecap='round'/>\
         <circle cx='{CX}' cy='{CY}' r='8' fill='hsl(220,10%,30%)'/>\
         <text x='12' y='130' font-size='9' font-weight='bold' fill='hsl(0,65%,48%)'>🔥 FIRED</text>\
         <text x='248' y='130' text-anchor='end' font-size='9' font-weight='bold' fill='hsl(120,60%,38%)'>PROMOTED 🏆</text></svg>\
         <div style='display:flex; justify-content:space-between; background:#fff; padding:3px 8px; border:2px inset #999;'>\
         <span>Status:</span><span style='font-weight:bold; color:{color};'>{label}</span><span style='font-size:10px;'>[{value}]</span></div>\
         </div></div>",
        x1 = CX - R,
        x2 = CX + R,
        color = status.color(),
        label = status.label(),
        value = meter.signed_label(),
    )
}

fn desktop_icons() -> String {
    let mut html = String::from(
        "<div style='position:absolute; top:16px; left:16px; display:flex; flex-direction:column; gap:16px; z-index:10;'>",
    );
    for (icon, label, bg) in DESKTOP_ICONS {
        let _ = write!(
            html,
            "<div style='display:flex; flex-direction:column; align-items:center; width:64px;'>\
             <div style='width:40px; height:40px; display:flex; align-items:center; justify-content:center; background:{bg}; border-radius:4px;'>{icon}</div>\
             <span style='font-size:10px; color:#fff; text-align:center; text-shadow:1px 1px 2px rgba(0,0,0,0.8);'>{}</span></div>",
            escape(label)
        );
    }
    html.push_str("</div>");
    html
}

fn procrastination_window() -> String {
    "<div class='xp-window' style='position:fixed; left:96px; top:40px; width:700px; z-index:20;'>\
     <div class='xp-title-bar' style='cursor:default;'><span>🌐 Google Chrome - CricketLiveScore.tv</span><span>_ □ ✕</span></div>\
     <div style='background:#d4d0c8; padding:3px 6px; font-size:11px;'>← → ⟳ \
     <span style='background:#fff; border:1px solid #808080; padding:1px 6px;'>https://www.cricketlive.tv/match/ind-vs-aus-2026</span></div>\
     <div style='background:#d4d0c8; padding:2px 4px; font-size:11px;'><b>Cricket Live 🏏</b> | Cat Videos 🐱 | YouTube</div>\
     <div style='background:#fff; padding:20px; text-align:center;'>\
     <h2 style='margin:0 0 16px;'>🏏 IND vs AUS - LIVE</h2>\
     <div style='display:flex; justify-content:space-around; background:#ece9d8; border:2px solid #808080; padding:12px;'>\
     <div><b>INDIA</b><div style='font-size:24px; color:#1d4ed8; font-weight:bold;'>287/4</div><small>(42.3 ov)</small></div>\
     <div style='align-self:center;'>vs</div>\
     <div><b>AUSTRALIA</b><div style='font-size:24px; color:#dc2626; font-weight:bold;'>265/10</div><small>(48.2 ov)</small></div></div>\
     <p style='color:#15803d; font-weight:bold;'>● LIVE - India need 22 runs from 45 balls</p>\
     <p style='font-size:11px; text-decoration:underline;'>Live Chat (2.4k) · Scorecard · Commentary</p></div></div>"
        .to_string()
}

fn teams_notification() -> String {
    "<div style='position:fixed; bottom:48px; right:16px; width:325px; z-index:50; border:2px solid #0a246a; box-shadow:6px 6px 0 #808080;'>\
     <div style='display:flex; align-items:center; background:#0a246a; color:#fff; padding:6px 10px; font-weight:bold; font-size:13px;'>\
     💬 Microsoft Teams<button class='xp-close' style='margin-left:auto;' data-action='teams-close'>✕</button></div>\
     <div style='background:#ece9d8; padding:10px 14px;'>\
     <div><b>Peter Parker</b><br><span style='font-size:11px; color:#444;'>pls fix</span></div>\
     <div style='text-align:right; margin-top:8px;'><button class='xp-button' data-action='teams-join'>Reply</button></div>\
     </div></div>"
        .to_string()
}

fn zoom_invite() -> String {
    let mut tiles = String::new();
    for (initials, name, color) in ZOOM_PARTICIPANTS {
        let _ = write!(
            tiles,
            "<div style='background:{color}; color:#fff; height:54px; display:flex; flex-direction:column; align-items:center; justify-content:center;'>\
             <b>{initials}</b><span style='font-size:9px;'>{name}</span></div>"
        );
    }
    format!(
        "<div style='display:flex; flex-direction:column; align-items:center; gap:8px;'>\
         <div style='display:grid; grid-template-columns:repeat(4,1fr); gap:4px; width:100%;'>{tiles}</div>\
         <h3 style='margin:0;'>📅 Meeting Invite</h3>\
         <p style='margin:0; font-weight:bold;'>\"Synergy Bandwidth Alignment Standup\"</p>\
         <p style='margin:0; font-size:10px; color:#555;'>Mandatory • 45 min • No agenda • All hands</p>\
         <div style='display:flex; gap:8px;'>\
         <button class='xp-button' data-action='zoom-decline'>✕ Decline</button>\
         <button class='xp-button' data-action='zoom-join'>✓ Join</button></div></div>"
    )
}

fn outlook_inbox() -> String {
    let mut rows = String::new();
    for (from, subject, time) in UNREAD_EMAILS {
        let _ = write!(
            rows,
            "<tr style='font-weight:bold;'><td>●</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(from),
            escape(subject),
            escape(time)
        );
    }
    for (from, subject, time) in READ_EMAILS {
        let _ = write!(
            rows,
            "<tr style='color:#555;'><td></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(from),
            escape(subject),
            escape(time)
        );
    }
    format!(
        "<div style='display:flex; gap:12px; padding:4px; background:linear-gradient(180deg,hsl(213,60%,88%),hsl(213,40%,80%)); font-size:13px;'>\
         <b>📥 Inbox</b><span>New</span><span>Reply</span><span>Forward</span><span>Delete</span>\
         <span style='margin-left:auto; color:#c00;'>{unread} Unread</span></div>\
         <table style='width:100%; border-collapse:collapse; font-size:12px;'>\
         <tr style='background:#eee; color:#555;'><th>!</th><th align='left'>From</th><th align='left'>Subject</th><th align='left'>Time</th></tr>{rows}</table>\
         <div style='display:flex; align-items:center; padding:3px 6px; border-top:1px solid #aaa; background:#ece9d8; font-size:11px;'>\
         <span>{total} Items, {unread} Unread</span>\
         <button class='xp-button' style='margin-left:auto;' data-action='outlook-close'>Close Inbox</button></div>",
        unread = UNREAD_EMAILS.len(),
        total = UNREAD_EMAILS.len() + READ_EMAILS.len(),
    )
}

pub fn wordle_board(game: &WordleGame) -> String {
    let mut html = String::from(
        "<div style='display:flex; flex-direction:column; align-items:center; gap:4px;'>",
    );
    for row in 0..MAX_GUESSES {
        html.push_str("<div style='display:flex; gap:4px;'>");
        let (letters, states): (Vec<char>, Option<[LetterState; WORD_LEN]>) =
            match game.guesses().get(row) {
                Some(g) => (g.chars().collect(), game.row_states(row)),
                None if row == game.guesses().len() => (game.current().chars().collect(), None),
                None => (Vec::new(), None),
            };
        for i in 0..WORD_LEN {
            let class = states.map(|s| s[i].css_class()).unwrap_or("");
            let letter = letters.get(i).copied().unwrap_or(' ');
            let _ = write!(html, "<div class='tile {class}'>{letter}</div>");
        }
        html.push_str("</div>");
    }
    if let Some(err) = game.error() {
        let _ = write!(html, "<p style='color:#dc2626; font-weight:bold; margin:2px;'>{err}</p>");
    }
    if let Some(answer) = game.revealed_answer() {
        let _ = write!(html, "<p style='margin:2px;'>The word was <b>{answer}</b></p>");
    }
    for keys in KEYBOARD_ROWS {
        html.push_str("<div style='display:flex;'>");
        for key in keys {
            let class = key
                .chars()
                .next()
                .filter(|_| key.len() == 1)
                .and_then(|c| game.key_state(c))
                .map(|s| s.css_class())
                .unwrap_or("");
            let _ = write!(html, "<button class='key {class}' data-key='{key}'>{key}</button>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

pub fn boss_dialog(dialog: &BossDialog, now: f64) -> String {
    let mut buttons = String::new();
    if dialog.shows_buttons(now) {
        buttons.push_str("<div style='margin-top:14px; display:flex; justify-content:flex-end; gap:8px;'>");
        if let Some(alt) = dialog.alt {
            let _ = write!(
                buttons,
                "<button class='xp-button' data-action='boss-alt'>{}</button>",
                escape(alt.label)
            );
        }
        let _ = write!(
            buttons,
            "<button class='xp-button-primary' data-action='boss-dismiss'>{}</button></div>",
            dialog.dismiss_label()
        );
    }
    format!(
        "<div style='position:fixed; inset:0; background:rgba(0,0,0,0.5); z-index:40;'></div>\
         <div style='position:fixed; inset:0; display:flex; align-items:center; justify-content:center; z-index:50;'>\
         <div class='xp-window' style='width:520px;'>\
         <div class='xp-title-bar' style='cursor:default;'><span>LIAR... CHEATER... <span style='color:#f87171;'>FIRED.</span></span></div>\
         <div class='xp-body' style='display:flex; gap:16px;'>\
         <div style='flex:1; background:#ece9d8; border:2px solid #808080; padding:10px; font-weight:bold; min-height:120px; white-space:pre-wrap;'>\
         {}<span>▌</span>{buttons}</div>\
         <div style='width:130px; text-align:center;'><div style='font-size:64px;'>👶</div><b>Boss Baby</b></div>\
         </div></div></div>",
        escape(dialog.visible_text(now))
    )
}

pub fn punishment_overlay(p: &Punishment, now: f64) -> String {
    let content = match p.kind {
        PunishmentKind::Teams => {
            let mut html = String::from("<div style='font-size:11px;'><div style='color:#666; border-bottom:1px solid #ccc;'># Engineering</div>");
            for (author, text, mine) in TEAMS_CHAT {
                let align = if *mine { "right" } else { "left" };
                let _ = write!(
                    html,
                    "<div style='text-align:{align}; margin:4px 0;'><b>{}</b><br>{}</div>",
                    escape(author),
                    escape(text)
                );
            }
            html.push_str("</div>");
            html
        }
        PunishmentKind::Zoom => {
            let mut html = String::from("<div style='display:grid; grid-template-columns:repeat(5,40px); gap:4px; justify-content:center;'>");
            for i in 0..ZOOM_TILE_COUNT {
                let _ = write!(
                    html,
                    "<div style='height:40px; background:#ddd; display:flex; align-items:center; justify-content:center; font-size:8px;'>{}</div>",
                    ZOOM_TILES[i % ZOOM_TILES.len()]
                );
            }
            html.push_str("</div>");
            html
        }
        PunishmentKind::Jira => {
            let mut html = String::from("<div style='display:flex; gap:6px;'>");
            for (heading, cards) in JIRA_COLUMNS {
                let _ = write!(html, "<div style='flex:1; background:#eee; padding:4px;'><b style='font-size:10px;'>{heading}</b>");
                for card in *cards {
                    let _ = write!(
                        html,
                        "<div style='background:#fff; border:1px solid #ccc; margin-top:4px; padding:3px; font-size:10px;'>{}</div>",
                        escape(card)
                    );
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
            html
        }
        PunishmentKind::Email => {
            let mut html = String::from("<div style='font-size:11px;'>");
            for line in EMAIL_LINES {
                let _ = write!(html, "<div style='border-bottom:1px solid #ddd; padding:2px;'>{}</div>", escape(line));
            }
            html.push_str("</div>");
            html
        }
    };
    let footer = p.kind.footer();
    let footer = if footer.is_empty() {
        String::new()
    } else {
        format!("<p style='font-size:10px; color:#666; text-align:center;'>{}</p>", escape(footer))
    };
    format!(
        "<div style='position:fixed; inset:0; background:rgba(0,0,0,0.6); z-index:60; display:flex; align-items:center; justify-content:center;'>\
         <div class='xp-window' style='width:420px;'>\
         <div class='xp-title-bar' style='cursor:default;'><span>{title}</span></div>\
         <div class='xp-body'>\
         <h3 style='color:#dc2626; text-align:center; margin:4px 0 8px;'>{heading}</h3>\
         {content}{footer}\
         <div style='height:10px; background:#ccc; border:1px solid #808080; margin-top:8px;'>\
         <div style='height:100%; width:{pct:.0}%; background:#16a34a;'></div></div>\
         </div></div></div>",
        title = escape(p.kind.title()),
        heading = escape(&p.heading(now)),
        pct = p.progress(now) * 100.0,
    )
}

pub fn intro_screen(skip_tutorials: bool) -> String {
    let toggle = if skip_tutorials { "ON" } else { "OFF" };
    format!(
        "<div style='position:fixed; inset:0; z-index:100; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:28px; text-align:center;'>\
         <div style='color:#fff; text-shadow:2px 2px 0 rgba(0,0,0,0.6);'>\
         <h1 style='margin:4px; font-size:42px;'>LIAR...</h1><h1 style='margin:4px; font-size:42px;'>CHEATER...</h1>\
         <h1 style='margin:4px; font-size:46px; color:#dc2626; letter-spacing:4px;'>FIRED.</h1></div>\
         <div class='xp-window' style='width:420px;'><div class='xp-title-bar' style='cursor:default;'><span>👶 Manager</span></div>\
         <div class='xp-body' style='font-weight:bold; padding:18px;'>\"I hate liars and cheaters. Why are you hired if you don't do your job? \
         <span style='color:#dc2626;'>Focus on work!</span>\"</div></div>\
         <button class='xp-button-primary' style='font-size:18px; padding:10px 36px;' data-action='intro-start'>🔥 I'm ready to get fired</button>\
         <div class='xp-window' style='width:340px;'><div class='xp-body' style='display:flex; justify-content:space-between; align-items:center;'>\
         <b>Skip tutorials</b><button class='xp-button' data-action='toggle-skip'>{toggle}</button></div></div>\
         <p style='position:absolute; bottom:16px; color:#fff; font-size:12px; font-style:italic; opacity:0.8;'>\
         (Disclaimer: This is not representative of us developers; we are very, very, very good employees.)</p></div>"
    )
}

pub fn fired_screen(confetti_seed: u64) -> String {
    let mut rng = SmallRng::seed_from_u64(confetti_seed);
    let mut confetti = String::new();
    for _ in 0..CONFETTI_PIECES {
        let x = rng.gen_range(0.0..100.0);
        let color = CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())];
        let delay = rng.gen_range(0.0..2.0);
        let size = rng.gen_range(4.0..12.0);
        let radius = if rng.gen_bool(0.5) { "50%" } else { "0" };
        let _ = write!(
            confetti,
            "<div class='confetti' style='left:{x:.1}%; width:{size:.1}px; height:{size:.1}px; background:{color}; animation-delay:{delay:.2}s; border-radius:{radius};'></div>"
        );
    }
    format!(
        "<div style='position:fixed; inset:0; z-index:100; display:flex; align-items:center; justify-content:center;'>{confetti}\
         <div class='xp-window' style='width:min(95vw,680px); z-index:2;'>\
         <div class='xp-title-bar' style='cursor:default;'><span>Office Simulator.exe</span><span>×</span></div>\
         <div class='xp-body' style='display:flex; flex-direction:column; align-items:center; gap:18px; padding:32px 24px; text-align:center;'>\
         <div style='font-size:60px;'>🎉</div>\
         <h1 style='color:#dc2626; font-size:44px; margin:0; animation:os-shake 0.5s ease-in-out infinite;'>YOU'RE FIRED!</h1>\
         <p style='font-size:18px; font-weight:bold;'>Congratulations! You successfully avoided all productivity and earned your freedom.</p>\
         <button class='xp-button-primary' data-action='restart'>PLAY AGAIN</button></div></div></div>"
    )
}

pub fn promoted_screen() -> String {
    "<div style='position:fixed; inset:0; z-index:100; display:flex; align-items:center; justify-content:center;'>\
     <div class='xp-window' style='width:min(95vw,680px);'>\
     <div class='xp-title-bar inactive' style='cursor:default;'><span>Human Resources</span><span>×</span></div>\
     <div class='xp-body' style='display:flex; flex-direction:column; align-items:center; gap:18px; padding:32px 24px; text-align:center;'>\
     <div style='font-size:56px;'>☹️</div>\
     <h1 style='font-size:34px; margin:0;'>WOW. CONGRATULATIONS.</h1>\
     <p style='font-size:18px;'>You were <strong>way too competent</strong> at your job. As a reward, you've been promoted to<br>\
     <span style='color:#dc2626; font-weight:bold; font-size:20px;'>Senior Vice President of Meetings</span></p>\
     <p style='font-size:13px; font-style:italic;'>Dream big. Now spend forever in back-to-back status calls.</p>\
     <button class='xp-button-primary' data-action='restart'>PLAY AGAIN</button></div></div></div>"
        .to_string()
}

pub fn taskbar(time: &str, date: &str) -> String {
    format!(
        "<div style='position:fixed; bottom:0; left:0; right:0; height:36px; z-index:50; display:flex; justify-content:space-between; align-items:center; background:linear-gradient(180deg,#245edb,#1941a5); color:#fff;'>\
         <div style='display:flex; align-items:center; gap:6px;'>\
         <button style='background:linear-gradient(180deg,#3c9a3c,#2a7a2a); color:#fff; font-weight:bold; font-style:italic; border:none; border-radius:0 10px 10px 0; height:36px; padding:0 18px;'>🖥️ Start</button>\
         <span title='Chrome'>🌐</span><span title='Teams'>💬</span><span title='Explorer'>📁</span></div>\
         <div style='display:flex; align-items:center; gap:8px; padding:0 10px; background:#0f8ae8; height:100%;'>🔊\
         <div style='text-align:right; line-height:1;'><b style='font-size:12px; display:block;'>{}</b><span style='font-size:9px;'>{}</span></div></div></div>",
        escape(time),
        escape(date)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::AltButton;

    fn view(stage: Stage, meter: &PerformanceMeter) -> DesktopView<'_> {
        DesktopView {
            stage,
            meter,
            skip_tutorials: true,
            punishment_active: false,
            window_pos: None,
            wordle: None,
            confetti_seed: 1,
        }
    }

    #[test]
    fn every_action_in_markup_maps_to_an_event() {
        let meter = PerformanceMeter::new();
        let mut html = String::new();
        for &stage in Stage::all() {
            html.push_str(&desktop(&view(stage, &meter)));
        }
        let dialog = BossDialog::new("Check your emails!", Stage::Pacman, 0.0, 0.0).with_alt(
            AltButton {
                label: "Fine.",
                target: Stage::Outlook,
            },
        );
        html.push_str(&boss_dialog(&dialog, 10.0));
        let mut seen = 0;
        for chunk in html.split("data-action='").skip(1) {
            let name = chunk.split('\'').next().unwrap_or_default();
            assert!(action_event(name).is_some(), "unmapped action {name}");
            seen += 1;
        }
        assert!(seen >= 11);
        assert_eq!(action_event("nope"), None);
    }

    #[test]
    fn desktop_layers_follow_stage() {
        let meter = PerformanceMeter::new();
        assert!(desktop(&view(Stage::Intro, &meter)).contains("I'm ready to get fired"));
        let teams = desktop(&view(Stage::Teams, &meter));
        assert!(teams.contains("Peter Parker") && teams.contains("CricketLiveScore"));
        let pong = desktop(&view(Stage::Pingpong, &meter));
        assert!(pong.contains(CANVAS_ID) && pong.contains("width='350'"));
        assert!(desktop(&view(Stage::PongHowto, &meter)).contains("How to Play: Pong"));
        assert!(desktop(&view(Stage::Outlook, &meter)).contains("7 Unread"));

        let mut hidden = view(Stage::Teams, &meter);
        hidden.punishment_active = true;
        assert!(!desktop(&hidden).contains("CricketLiveScore"));
    }

    #[test]
    fn dragged_window_keeps_position() {
        let meter = PerformanceMeter::new();
        let mut v = view(Stage::Zoom, &meter);
        v.window_pos = Some((120.0, 64.0));
        let html = desktop(&v);
        assert!(html.contains("left:120px; top:64px;"));
        assert!(html.contains("data-drag"));
    }

    #[test]
    fn boss_buttons_wait_for_typing() {
        let dialog = BossDialog::new("Hi <you>", Stage::Zoom, 0.0, 25.0);
        let early = boss_dialog(&dialog, 50.0);
        assert!(early.contains("Hi"));
        assert!(!early.contains("boss-dismiss"));
        let done = boss_dialog(&dialog, 1_000.0);
        assert!(done.contains("Hi &lt;you&gt;"));
        assert!(done.contains("AGH, fine..."));
    }

    #[test]
    fn fired_confetti_is_stable_per_seed() {
        assert_eq!(fired_screen(9), fired_screen(9));
        assert_eq!(fired_screen(9).matches("class='confetti'").count(), CONFETTI_PIECES);
    }

    #[test]
    fn punishment_shows_countdown_and_theme() {
        let p = Punishment::new(Stage::Tetris, Stage::TetrisDone, true, 0.0, 5);
        let html = punishment_overlay(&p, 2_100.0);
        assert!(html.contains("endure 3s of work"));
        assert!(html.contains("Refactor API"));
        assert!(html.contains("width:40%"));
    }

    #[test]
    fn wordle_board_marks_tiles_and_keys() {
        use crate::games::Minigame;
        let mut g = WordleGame::with_target("PIVOT", &[]);
        for k in ["A", "G", "I", "L", "E", "Enter", "P"] {
            g.key_down(k);
        }
        let html = wordle_board(&g);
        assert!(html.contains("tile tile-present'>I"));
        assert!(html.contains("data-key='G'"));
        assert!(html.contains("class='key tile-absent' data-key='A'"));
        assert!(html.contains("<div class='tile '>P</div>"));
    }

    #[test]
    fn meter_panel_reports_status() {
        let mut meter = PerformanceMeter::new();
        meter.nudge(-30);
        let html = meter_panel(&meter);
        assert!(html.contains("CRITICAL"));
        assert!(html.contains("[-30]"));
    }

    #[test]
    fn outlook_status_bar_offers_close_inbox() {
        let meter = PerformanceMeter::new();
        let html = desktop(&view(Stage::Outlook, &meter));
        assert!(html.contains("12 Items, 7 Unread"));
        assert!(html.contains("data-action='outlook-close'>Close Inbox</button>"));
        assert_eq!(action_event("outlook-close"), Some(Event::OutlookClose));
    }
}
