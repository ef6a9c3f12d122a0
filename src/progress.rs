//! Progress reporting for long-running GDAL operations
//!
//! GDAL reports progress through a `GDALProgressFunc` C callback. Here a callback is any
//! `FnMut(f64, &str) -> bool`. It receives the completed fraction in `[0, 1]` and an
//! optional message. Returning `false` asks GDAL to cancel the operation.

use std::ffi::{c_char, c_int, c_void};
use std::io::{self, Stderr, Write};
use std::ptr;

use gdal_sys::GDALProgressFunc;

use crate::utils::_string;

pub type ProgressFn<'a> = dyn FnMut(f64, &str) -> bool + 'a;

unsafe extern "C" fn progress_trampoline(
    complete: f64,
    message: *const c_char,
    progress_arg: *mut c_void,
) -> c_int {
    if progress_arg.is_null() {
        return 1;
    }
    let callback: &mut Box<ProgressFn> = &mut *(progress_arg as *mut Box<ProgressFn>);
    callback(complete, &_string(message)) as c_int
}

/// Owns a progress callback for the duration of one GDAL call.
///
/// The callback is double boxed so that [`ProgressHook::arg`] is a thin, stable pointer.
pub struct ProgressHook<'a> {
    callback: Option<Box<Box<ProgressFn<'a>>>>,
}

impl<'a> ProgressHook<'a> {
    /// Terminal progress bar on stderr, or no reporting at all when `quiet`.
    pub fn terminal(quiet: bool) -> Self {
        if quiet {
            return Self::none();
        }
        let mut bar = TermProgress::new();
        Self::with_callback(move |complete, _msg| bar.update(complete))
    }

    pub fn with_callback<F>(callback: F) -> Self
    where
        F: FnMut(f64, &str) -> bool + 'a,
    {
        Self {
            callback: Some(Box::new(Box::new(callback))),
        }
    }

    pub fn none() -> Self {
        Self { callback: None }
    }

    /// The C function to hand to GDAL, `None` when no reporting is wanted.
    pub fn func(&self) -> GDALProgressFunc {
        match self.callback {
            Some(_) => Some(progress_trampoline),
            None => None,
        }
    }

    /// The `pProgressArg` matching [`ProgressHook::func`].
    pub fn arg(&mut self) -> *mut c_void {
        match self.callback.as_mut() {
            Some(callback) => callback.as_mut() as *mut Box<ProgressFn<'a>> as *mut c_void,
            None => ptr::null_mut(),
        }
    }
}

const BAR_WIDTH: usize = 40;

/// A single-line progress bar.
///
/// A bar starts when progress is `0` or when none is active. Values below `1` advance
/// it, and `1` or above finishes it.
pub struct TermProgress<W: Write = Stderr> {
    out: W,
    active: bool,
    last_percent: Option<usize>,
}

impl TermProgress<Stderr> {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl Default for TermProgress<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TermProgress<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            active: false,
            last_percent: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advances the bar. Always returns `true`, a terminal bar never cancels.
    pub fn update(&mut self, complete: f64) -> bool {
        if complete <= 0.0 || !self.active {
            if self.active {
                self.finish();
            }
            self.active = true;
            self.last_percent = None;
        }

        if complete >= 1.0 {
            self.draw(100);
            self.finish();
        } else {
            let percent = (complete.max(0.0) * 100.0).floor() as usize;
            if self.last_percent != Some(percent) {
                self.draw(percent);
            }
        }
        true
    }

    fn draw(&mut self, percent: usize) {
        let filled = percent * BAR_WIDTH / 100;
        let bar: String = std::iter::repeat('=')
            .take(filled)
            .chain(std::iter::repeat(' ').take(BAR_WIDTH - filled))
            .collect();
        // a broken terminal is not worth failing the GDAL operation over
        let _ = write!(self.out, "\r[{bar}] {percent:>3}%");
        let _ = self.out.flush();
        self.last_percent = Some(percent);
    }

    fn finish(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
        self.active = false;
        self.last_percent = None;
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
