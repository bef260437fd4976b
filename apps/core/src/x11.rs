use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt, GetPropertyReply, Window};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use crate::icon_cache::RawIcon;
use crate::logging;
use crate::window_source::{RawWindow, SourceError, WindowSource};

/// EWMH-based window source. Enumeration reads `_NET_CLIENT_LIST` from the
/// root window after a full round-trip sync, so the returned set reflects a
/// drained event queue rather than a partially-populated one.
pub struct X11WindowSource {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
}

struct Atoms {
    net_client_list: Atom,
    net_wm_name: Atom,
    utf8_string: Atom,
    net_wm_state: Atom,
    net_wm_state_skip_pager: Atom,
    net_wm_state_skip_taskbar: Atom,
    net_wm_icon: Atom,
    net_wm_desktop: Atom,
}

impl Atoms {
    fn intern(conn: &RustConnection) -> Result<Self, SourceError> {
        Ok(Self {
            net_client_list: intern_atom(conn, b"_NET_CLIENT_LIST")?,
            net_wm_name: intern_atom(conn, b"_NET_WM_NAME")?,
            utf8_string: intern_atom(conn, b"UTF8_STRING")?,
            net_wm_state: intern_atom(conn, b"_NET_WM_STATE")?,
            net_wm_state_skip_pager: intern_atom(conn, b"_NET_WM_STATE_SKIP_PAGER")?,
            net_wm_state_skip_taskbar: intern_atom(conn, b"_NET_WM_STATE_SKIP_TASKBAR")?,
            net_wm_icon: intern_atom(conn, b"_NET_WM_ICON")?,
            net_wm_desktop: intern_atom(conn, b"_NET_WM_DESKTOP")?,
        })
    }
}

fn intern_atom(conn: &RustConnection, name: &[u8]) -> Result<Atom, SourceError> {
    conn.intern_atom(false, name)
        .map_err(|error| SourceError::new(format!("atom request failed: {error}")))?
        .reply()
        .map(|reply| reply.atom)
        .map_err(|error| SourceError::new(format!("atom reply failed: {error}")))
}

impl X11WindowSource {
    pub fn connect() -> Result<Self, SourceError> {
        let (conn, screen_num) = x11rb::connect(None)
            .map_err(|error| SourceError::new(format!("x11 connect failed: {error}")))?;
        let root = conn.setup().roots[screen_num].root;
        let atoms = Atoms::intern(&conn)?;
        Ok(Self { conn, root, atoms })
    }

    fn property(
        &self,
        window: Window,
        property: impl Into<Atom>,
        ty: impl Into<Atom>,
    ) -> Result<GetPropertyReply, SourceError> {
        self.conn
            .get_property(false, window, property, ty, 0, u32::MAX)
            .map_err(|error| SourceError::new(format!("property request failed: {error}")))?
            .reply()
            .map_err(|error| SourceError::new(format!("property reply failed: {error}")))
    }

    fn read_window(&self, id: Window) -> Result<RawWindow, SourceError> {
        let title = self.window_title(id)?;
        let app_name = self.window_class(id)?;
        let state = self.window_state(id)?;
        let workspace = self.window_desktop(id)?;

        // Icon bytes are best-effort; a failed read is not a reason to drop
        // the window from the switcher.
        let icon = match self.window_icon(id) {
            Ok(icon) => icon,
            Err(error) => {
                logging::warn(&format!("icon property failed for window 0x{id:x}: {error}"));
                None
            }
        };

        Ok(RawWindow {
            id: u64::from(id),
            app_name,
            title,
            icon,
            skip_pager: state.contains(&self.atoms.net_wm_state_skip_pager),
            skip_tasklist: state.contains(&self.atoms.net_wm_state_skip_taskbar),
            workspace,
        })
    }

    fn window_title(&self, id: Window) -> Result<Option<String>, SourceError> {
        let reply = self.property(id, self.atoms.net_wm_name, self.atoms.utf8_string)?;
        if reply.value_len > 0 {
            return Ok(Some(String::from_utf8_lossy(&reply.value).into_owned()));
        }

        let reply = self.property(id, AtomEnum::WM_NAME, AtomEnum::STRING)?;
        if reply.value_len > 0 {
            return Ok(Some(String::from_utf8_lossy(&reply.value).into_owned()));
        }
        Ok(None)
    }

    fn window_class(&self, id: Window) -> Result<Option<String>, SourceError> {
        let reply = self.property(id, AtomEnum::WM_CLASS, AtomEnum::STRING)?;
        Ok(parse_wm_class(&reply.value))
    }

    fn window_state(&self, id: Window) -> Result<Vec<Atom>, SourceError> {
        let reply = self.property(id, self.atoms.net_wm_state, AtomEnum::ATOM)?;
        Ok(reply
            .value32()
            .map(|values| values.collect())
            .unwrap_or_default())
    }

    fn window_desktop(&self, id: Window) -> Result<Option<u32>, SourceError> {
        let reply = self.property(id, self.atoms.net_wm_desktop, AtomEnum::CARDINAL)?;
        Ok(reply.value32().and_then(|mut values| values.next()))
    }

    fn window_icon(&self, id: Window) -> Result<Option<RawIcon>, SourceError> {
        let reply = self.property(id, self.atoms.net_wm_icon, AtomEnum::CARDINAL)?;
        let data: Vec<u32> = match reply.value32() {
            Some(values) => values.collect(),
            None => return Ok(None),
        };
        Ok(first_icon(&data))
    }
}

impl WindowSource for X11WindowSource {
    fn source_name(&self) -> &'static str {
        "x11"
    }

    fn windows(&self) -> Result<Vec<RawWindow>, SourceError> {
        self.conn
            .sync()
            .map_err(|error| SourceError::new(format!("x11 sync failed: {error}")))?;

        let reply = self.property(self.root, self.atoms.net_client_list, AtomEnum::WINDOW)?;
        let ids: Vec<Window> = reply
            .value32()
            .map(|values| values.collect())
            .unwrap_or_default();

        let mut windows = Vec::with_capacity(ids.len());
        for id in ids {
            match self.read_window(id) {
                Ok(window) => windows.push(window),
                // A window can vanish between the list reply and the
                // property reads; skip it and keep the batch.
                Err(error) => logging::warn(&format!("skipping window 0x{id:x}: {error}")),
            }
        }
        Ok(windows)
    }
}

/// `WM_CLASS` carries `instance\0class\0`; the class half is the
/// human-facing application name. Falls back to the instance half.
fn parse_wm_class(value: &[u8]) -> Option<String> {
    let mut parts = value.split(|byte| *byte == 0).filter(|part| !part.is_empty());
    let instance = parts.next();
    let class = parts.next().or(instance)?;
    Some(String::from_utf8_lossy(class).into_owned())
}

/// `_NET_WM_ICON` is a sequence of `width, height, width*height ARGB`
/// entries; the first one is taken as-is.
fn first_icon(data: &[u32]) -> Option<RawIcon> {
    if data.len() < 2 {
        return None;
    }

    let width = data[0] as usize;
    let height = data[1] as usize;
    let pixels = width.checked_mul(height)?;
    if pixels == 0 || data.len() < 2 + pixels {
        return None;
    }

    let mut rgba = Vec::with_capacity(pixels * 4);
    for argb in &data[2..2 + pixels] {
        rgba.push((argb >> 16) as u8);
        rgba.push((argb >> 8) as u8);
        rgba.push(*argb as u8);
        rgba.push((argb >> 24) as u8);
    }

    Some(RawIcon::new(width as u32, height as u32, rgba))
}
