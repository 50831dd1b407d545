use std::fmt;

use serde_json::Value;

/// What a rule resolves to. The router never inspects or calls it.
pub enum Controller<H> {
    /// A plain identifier, e.g. `"users#show"`.
    Name(String),
    /// An executable value together with its portable identity.
    Handler(Callable<H>),
}

/// An executable controller.
///
/// `key` names the code in a [`HandlerRegistry`](crate::HandlerRegistry)
/// and `env` is the state it closes over. Together they are enough to
/// rebuild the executable after a round-trip through the codec.
pub struct Callable<H> {
    key: Box<str>,
    env: Value,
    inner: H,
}

impl<H> Callable<H> {
    pub fn new(key: impl Into<Box<str>>, env: Value, inner: H) -> Self {
        Self {
            key: key.into(),
            env,
            inner,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn env(&self) -> &Value {
        &self.env
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H> Controller<H> {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Handler(_) => None,
        }
    }

    pub fn handler(&self) -> Option<&H> {
        match self {
            Self::Name(_) => None,
            Self::Handler(c) => Some(c.inner()),
        }
    }

    #[inline]
    pub fn is_handler(&self) -> bool {
        match self {
            Self::Name(_) => false,
            Self::Handler(_) => true,
        }
    }
}

impl<H> From<&str> for Controller<H> {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl<H> From<String> for Controller<H> {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl<H> From<Callable<H>> for Controller<H> {
    fn from(c: Callable<H>) -> Self {
        Self::Handler(c)
    }
}

// Identity only: executables are compared by key and environment.
impl<H> PartialEq for Controller<H> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Name(a), Self::Name(b)) => a == b,
            (Self::Handler(a), Self::Handler(b)) => a.key == b.key && a.env == b.env,
            _ => false,
        }
    }
}

impl<H> fmt::Debug for Controller<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Handler(c) => f
                .debug_struct("Handler")
                .field("key", &c.key)
                .field("env", &c.env)
                .finish(),
        }
    }
}
