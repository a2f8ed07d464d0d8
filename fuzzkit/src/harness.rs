//! Registering fuzz tests with a host test framework.
//!
//! Two families of entry points turn fuzzers plus a check callback into
//! registrations on a [`Registrar`]:
//!
//! - **Batched** ([`fuzz`], [`fuzz2`], [`fuzz3`]) register one test whose body
//!   runs the check against [`TEST_PASSES`] freshly generated inputs, stopping
//!   at the first failure.
//! - **Explained** ([`fuzz_explained`], [`fuzz2_explained`], [`fuzz3_explained`])
//!   generate every input up front and register one test per input, each named
//!   after the values it will be checked with.
//!
//! A check passes by returning normally (or `true`, or `Ok(())`) and fails by
//! panicking (or returning `false`, or `Err`). See [`CheckOutcome`].
//!
//! [`TEST_PASSES`]: crate::config::TEST_PASSES

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::FuzzConfig;
use crate::error::{CheckFailure, CheckOutcome};
use crate::fuzzer::{Fuzzer, FuzzerTuple};
use crate::rng::create_rng;

/// The body of a registered test. It fails by panicking.
pub type TestBody = Box<dyn FnOnce() + Send + 'static>;

/// The capability a host test framework provides: schedule a named body for
/// later execution and report pass or fail depending on whether it panics.
pub trait Registrar {
    /// Register `body` under `name`
    fn register(&mut self, name: String, body: TestBody);
}

/// Render one generated value for a unit name or failure message.
///
/// Text values appear as their literal contents; everything else uses `Debug`.
fn render<T: fmt::Debug + 'static>(value: &T) -> String {
    let any: &dyn Any = value;
    if let Some(text) = any.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = any.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(c) = any.downcast_ref::<char>() {
        c.to_string()
    } else {
        format!("{:?}", value)
    }
}

/// Inputs that can be rendered one value at a time
pub(crate) trait Inputs {
    fn describe(&self) -> Vec<String>;
}

macro_rules! impl_inputs {
    ($($ty:ident $idx:tt),+) => {
        impl<$($ty: fmt::Debug + 'static),+> Inputs for ($($ty,)+) {
            fn describe(&self) -> Vec<String> {
                vec![$(render(&self.$idx)),+]
            }
        }
    };
}

impl_inputs!(A 0);
impl_inputs!(A 0, B 1);
impl_inputs!(A 0, B 1, C 2);

/// Build a unit name by substituting `{}` placeholders with rendered values.
///
/// Values arrive already rendered: strings and chars verbatim, everything
/// else by its `Debug` output. Values left over once the placeholders run out are appended in
/// parentheses; unmatched placeholders are kept as-is.
pub(crate) fn explain(description: &str, values: &[String]) -> String {
    let mut values = values.iter();
    let mut pieces = description.split("{}");
    let mut name = pieces.next().unwrap_or_default().to_string();

    for piece in pieces {
        match values.next() {
            Some(value) => name.push_str(value),
            None => name.push_str("{}"),
        }
        name.push_str(piece);
    }

    let rest: Vec<&str> = values.map(String::as_str).collect();
    if !rest.is_empty() {
        name.push_str(&format!(" ({})", rest.join(", ")));
    }
    name
}

fn register_batched<R, G, C>(
    registrar: &mut R,
    passes: usize,
    fuzzers: G,
    description: &str,
    check: C,
) where
    R: Registrar + ?Sized,
    G: FuzzerTuple,
    G::Output: Inputs,
    C: Fn(G::Output) -> Result<(), String> + Send + Sync + 'static,
{
    debug!(name = %description, passes, "registering batched fuzz test");

    let description = description.to_string();
    let name = description.clone();
    registrar.register(
        name,
        Box::new(move || {
            let mut rng = create_rng();
            for pass in 0..passes {
                let inputs = fuzzers.generate_all(&mut rng);
                // The check consumes the inputs, so the failure text is rendered up front.
                let rendered = inputs.describe().join(", ");
                trace!(name = %description, pass, input = %rendered, "running check");

                if let Err(message) = check(inputs) {
                    let failure = CheckFailure::new(description.as_str(), message)
                        .on_pass(pass)
                        .with_input(rendered);
                    panic!("{}", failure);
                }
            }
        }),
    );
}

fn register_explained<R, G, C>(
    registrar: &mut R,
    passes: usize,
    fuzzers: G,
    description: &str,
    check: C,
) where
    R: Registrar + ?Sized,
    G: FuzzerTuple,
    G::Output: Inputs + Send,
    C: Fn(G::Output) -> Result<(), String> + Send + Sync + 'static,
{
    debug!(name = %description, passes, "registering explained fuzz tests");

    // Names embed the values, so every case exists before the first register call.
    let mut rng = create_rng();
    let cases: Vec<G::Output> = (0..passes)
        .map(|_| fuzzers.generate_all(&mut rng))
        .collect();

    let check = Arc::new(check);
    for inputs in cases {
        let name = explain(description, &inputs.describe());
        let unit_name = name.clone();
        let check = Arc::clone(&check);

        registrar.register(
            name,
            Box::new(move || {
                if let Err(message) = check(inputs) {
                    panic!("{}", CheckFailure::new(unit_name, message));
                }
            }),
        );
    }
}

impl FuzzConfig {
    /// Register one test running `check` against `self.passes()` values of `fuzzer`.
    pub fn fuzz<R, A, O, F>(
        &self,
        registrar: &mut R,
        fuzzer: &Fuzzer<A>,
        description: &str,
        check: F,
    ) where
        R: Registrar + ?Sized,
        A: fmt::Debug + 'static,
        O: CheckOutcome,
        F: Fn(A) -> O + Send + Sync + 'static,
    {
        register_batched(
            registrar,
            self.passes(),
            (fuzzer.clone(),),
            description,
            move |(a,): (A,)| check(a).into_verdict(),
        );
    }

    /// Two-fuzzer form of [`FuzzConfig::fuzz`]; values arrive in argument order.
    pub fn fuzz2<R, A, B, O, F>(
        &self,
        registrar: &mut R,
        a: &Fuzzer<A>,
        b: &Fuzzer<B>,
        description: &str,
        check: F,
    ) where
        R: Registrar + ?Sized,
        A: fmt::Debug + 'static,
        B: fmt::Debug + 'static,
        O: CheckOutcome,
        F: Fn(A, B) -> O + Send + Sync + 'static,
    {
        register_batched(
            registrar,
            self.passes(),
            (a.clone(), b.clone()),
            description,
            move |(a, b): (A, B)| check(a, b).into_verdict(),
        );
    }

    /// Three-fuzzer form of [`FuzzConfig::fuzz`]; values arrive in argument order.
    pub fn fuzz3<R, A, B, C, O, F>(
        &self,
        registrar: &mut R,
        a: &Fuzzer<A>,
        b: &Fuzzer<B>,
        c: &Fuzzer<C>,
        description: &str,
        check: F,
    ) where
        R: Registrar + ?Sized,
        A: fmt::Debug + 'static,
        B: fmt::Debug + 'static,
        C: fmt::Debug + 'static,
        O: CheckOutcome,
        F: Fn(A, B, C) -> O + Send + Sync + 'static,
    {
        register_batched(
            registrar,
            self.passes(),
            (a.clone(), b.clone(), c.clone()),
            description,
            move |(a, b, c): (A, B, C)| check(a, b, c).into_verdict(),
        );
    }

    /// Register `self.passes()` tests, one per generated value of `fuzzer`.
    pub fn fuzz_explained<R, A, O, F>(
        &self,
        registrar: &mut R,
        fuzzer: &Fuzzer<A>,
        description: &str,
        check: F,
    ) where
        R: Registrar + ?Sized,
        A: fmt::Debug + Send + 'static,
        O: CheckOutcome,
        F: Fn(A) -> O + Send + Sync + 'static,
    {
        register_explained(
            registrar,
            self.passes(),
            (fuzzer.clone(),),
            description,
            move |(a,): (A,)| check(a).into_verdict(),
        );
    }

    /// Two-fuzzer form of [`FuzzConfig::fuzz_explained`].
    pub fn fuzz2_explained<R, A, B, O, F>(
        &self,
        registrar: &mut R,
        a: &Fuzzer<A>,
        b: &Fuzzer<B>,
        description: &str,
        check: F,
    ) where
        R: Registrar + ?Sized,
        A: fmt::Debug + Send + 'static,
        B: fmt::Debug + Send + 'static,
        O: CheckOutcome,
        F: Fn(A, B) -> O + Send + Sync + 'static,
    {
        register_explained(
            registrar,
            self.passes(),
            (a.clone(), b.clone()),
            description,
            move |(a, b): (A, B)| check(a, b).into_verdict(),
        );
    }

    /// Three-fuzzer form of [`FuzzConfig::fuzz_explained`].
    pub fn fuzz3_explained<R, A, B, C, O, F>(
        &self,
        registrar: &mut R,
        a: &Fuzzer<A>,
        b: &Fuzzer<B>,
        c: &Fuzzer<C>,
        description: &str,
        check: F,
    ) where
        R: Registrar + ?Sized,
        A: fmt::Debug + Send + 'static,
        B: fmt::Debug + Send + 'static,
        C: fmt::Debug + Send + 'static,
        O: CheckOutcome,
        F: Fn(A, B, C) -> O + Send + Sync + 'static,
    {
        register_explained(
            registrar,
            self.passes(),
            (a.clone(), b.clone(), c.clone()),
            description,
            move |(a, b, c): (A, B, C)| check(a, b, c).into_verdict(),
        );
    }
}

/// Register one test that checks 100 values of `fuzzer`.
///
/// ```rust
/// use fuzzkit::{TestSuite, array, fuzz, int};
///
/// let mut suite = TestSuite::new("vec");
/// fuzz(&mut suite, &array(&int()), "reversing twice is identity", |v| {
///     let mut twice = v.clone();
///     twice.reverse();
///     twice.reverse();
///     twice == v
/// });
/// suite.run().assert_success();
/// ```
pub fn fuzz<R, A, O, F>(registrar: &mut R, fuzzer: &Fuzzer<A>, description: &str, check: F)
where
    R: Registrar + ?Sized,
    A: fmt::Debug + 'static,
    O: CheckOutcome,
    F: Fn(A) -> O + Send + Sync + 'static,
{
    FuzzConfig::default().fuzz(registrar, fuzzer, description, check)
}

/// Register one test that checks 100 pairs drawn from `a` and `b`.
pub fn fuzz2<R, A, B, O, F>(
    registrar: &mut R,
    a: &Fuzzer<A>,
    b: &Fuzzer<B>,
    description: &str,
    check: F,
) where
    R: Registrar + ?Sized,
    A: fmt::Debug + 'static,
    B: fmt::Debug + 'static,
    O: CheckOutcome,
    F: Fn(A, B) -> O + Send + Sync + 'static,
{
    FuzzConfig::default().fuzz2(registrar, a, b, description, check)
}

/// Register one test that checks 100 triples drawn from `a`, `b` and `c`.
pub fn fuzz3<R, A, B, C, O, F>(
    registrar: &mut R,
    a: &Fuzzer<A>,
    b: &Fuzzer<B>,
    c: &Fuzzer<C>,
    description: &str,
    check: F,
) where
    R: Registrar + ?Sized,
    A: fmt::Debug + 'static,
    B: fmt::Debug + 'static,
    C: fmt::Debug + 'static,
    O: CheckOutcome,
    F: Fn(A, B, C) -> O + Send + Sync + 'static,
{
    FuzzConfig::default().fuzz3(registrar, a, b, c, description, check)
}

/// Register 100 tests, one per value of `fuzzer`, each named after its value.
///
/// ```rust
/// use fuzzkit::{TestSuite, fuzz_explained, int_range};
///
/// let mut suite = TestSuite::new("digits");
/// fuzz_explained(&mut suite, &int_range(0, 9).unwrap(), "{} is a digit", |n| n < 10);
/// assert_eq!(suite.len(), 100);
/// assert!(suite.names()[0].ends_with(" is a digit"));
/// ```
pub fn fuzz_explained<R, A, O, F>(
    registrar: &mut R,
    fuzzer: &Fuzzer<A>,
    description: &str,
    check: F,
) where
    R: Registrar + ?Sized,
    A: fmt::Debug + Send + 'static,
    O: CheckOutcome,
    F: Fn(A) -> O + Send + Sync + 'static,
{
    FuzzConfig::default().fuzz_explained(registrar, fuzzer, description, check)
}

/// Register 100 tests, one per pair drawn from `a` and `b`.
pub fn fuzz2_explained<R, A, B, O, F>(
    registrar: &mut R,
    a: &Fuzzer<A>,
    b: &Fuzzer<B>,
    description: &str,
    check: F,
) where
    R: Registrar + ?Sized,
    A: fmt::Debug + Send + 'static,
    B: fmt::Debug + Send + 'static,
    O: CheckOutcome,
    F: Fn(A, B) -> O + Send + Sync + 'static,
{
    FuzzConfig::default().fuzz2_explained(registrar, a, b, description, check)
}

/// Register 100 tests, one per triple drawn from `a`, `b` and `c`.
pub fn fuzz3_explained<R, A, B, C, O, F>(
    registrar: &mut R,
    a: &Fuzzer<A>,
    b: &Fuzzer<B>,
    c: &Fuzzer<C>,
    description: &str,
    check: F,
) where
    R: Registrar + ?Sized,
    A: fmt::Debug + Send + 'static,
    B: fmt::Debug + Send + 'static,
    C: fmt::Debug + Send + 'static,
    O: CheckOutcome,
    F: Fn(A, B, C) -> O + Send + Sync + 'static,
{
    FuzzConfig::default().fuzz3_explained(registrar, a, b, c, description, check)
}
