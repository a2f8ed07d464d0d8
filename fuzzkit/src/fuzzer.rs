//! The [`Fuzzer`] type and its combinators.
//!
//! A fuzzer is an immutable, shareable recipe for producing values from the
//! raw random source. Combinators never sample the source themselves; they
//! only call into the fuzzers they wrap, always in argument order.

use std::fmt;
use std::sync::Arc;

type GenerateFn<T> = dyn Fn(&mut dyn rand::RngCore) -> T + Send + Sync;

/// A composable strategy for producing pseudo-random values of type `T`.
///
/// Cloning a fuzzer is cheap: the clone shares the same generation function.
/// Fuzzers hold no mutable state, so one definition can be reused from any
/// number of tests, threads included.
///
/// Values are only produced by the harness (see [`crate::harness`]); there is
/// no public way to invoke generation directly.
pub struct Fuzzer<T> {
    generate: Arc<GenerateFn<T>>,
}

impl<T> Clone for Fuzzer<T> {
    fn clone(&self) -> Self {
        Self {
            generate: Arc::clone(&self.generate),
        }
    }
}

impl<T> fmt::Debug for Fuzzer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fuzzer<{}>", std::any::type_name::<T>())
    }
}

impl<T: 'static> Fuzzer<T> {
    pub(crate) fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut dyn rand::RngCore) -> T + Send + Sync + 'static,
    {
        Self {
            generate: Arc::new(f),
        }
    }

    /// Produce one fresh value. Every call re-samples the raw source.
    pub(crate) fn generate(&self, rng: &mut dyn rand::RngCore) -> T {
        (self.generate)(rng)
    }

    /// Method form of [`map`].
    pub fn map<U, F>(&self, f: F) -> Fuzzer<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        map(self, f)
    }

    /// Method form of [`and_then`].
    pub fn and_then<U, F>(&self, f: F) -> Fuzzer<U>
    where
        U: 'static,
        F: Fn(T) -> Fuzzer<U> + Send + Sync + 'static,
    {
        and_then(self, f)
    }
}

/// Transform every value produced by `fuzzer` with `f`.
///
/// ```rust
/// use fuzzkit::{int_range, map};
///
/// let evens = map(&int_range(0, 50).unwrap(), |n| n * 2);
/// # let _ = evens;
/// ```
pub fn map<T, U, F>(fuzzer: &Fuzzer<T>, f: F) -> Fuzzer<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    let inner = fuzzer.clone();
    Fuzzer::from_fn(move |rng| f(inner.generate(rng)))
}

pub use self::map as map1;

/// Generate a value, then use it to pick the fuzzer for the final value.
///
/// The fuzzer returned by `f` is generated from immediately, in the same
/// draw, so its shape can depend on the first value:
///
/// ```rust
/// use fuzzkit::int_range;
///
/// // A bound, then a value below that bound.
/// let bounded = int_range(1, 100)
///     .unwrap()
///     .and_then(|max| int_range(0, max).unwrap().map(move |v| (max, v)));
/// # let _ = bounded;
/// ```
pub fn and_then<T, U, F>(fuzzer: &Fuzzer<T>, f: F) -> Fuzzer<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Fuzzer<U> + Send + Sync + 'static,
{
    let inner = fuzzer.clone();
    Fuzzer::from_fn(move |rng| f(inner.generate(rng)).generate(rng))
}

/// A fixed-size group of fuzzers generated together, left to right.
pub(crate) trait FuzzerTuple: Send + Sync + 'static {
    type Output: 'static;

    fn generate_all(&self, rng: &mut dyn rand::RngCore) -> Self::Output;
}

macro_rules! impl_fuzzer_tuple {
    ($($ty:ident $idx:tt),+) => {
        impl<$($ty: 'static),+> FuzzerTuple for ($(Fuzzer<$ty>,)+) {
            type Output = ($($ty,)+);

            fn generate_all(&self, rng: &mut dyn rand::RngCore) -> Self::Output {
                // Tuple expressions evaluate left to right.
                ($(self.$idx.generate(rng),)+)
            }
        }
    };
}

impl_fuzzer_tuple!(A 0);
impl_fuzzer_tuple!(A 0, B 1);
impl_fuzzer_tuple!(A 0, B 1, C 2);
impl_fuzzer_tuple!(A 0, B 1, C 2, D 3);
impl_fuzzer_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_fuzzer_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_fuzzer_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_fuzzer_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Generate every fuzzer in the tuple in order and collect the results.
pub(crate) fn zip<G: FuzzerTuple>(fuzzers: G) -> Fuzzer<G::Output> {
    Fuzzer::from_fn(move |rng| fuzzers.generate_all(rng))
}

macro_rules! map_n {
    ($(#[$doc:meta])* $name:ident: $first_ty:ident $first:ident $(, $ty:ident $arg:ident)+) => {
        $(#[$doc])*
        pub fn $name<$first_ty, $($ty,)+ R, Func>(
            $first: &Fuzzer<$first_ty>,
            $($arg: &Fuzzer<$ty>,)+
            f: Func,
        ) -> Fuzzer<R>
        where
            $first_ty: 'static,
            $($ty: 'static,)+
            R: 'static,
            Func: Fn($first_ty, $($ty),+) -> R + Send + Sync + 'static,
        {
            map(
                &zip(($first.clone(), $($arg.clone(),)+)),
                move |($first, $($arg,)+)| f($first, $($arg),+),
            )
        }

        impl<$first_ty: 'static> Fuzzer<$first_ty> {
            #[doc = concat!("Method form of [`", stringify!($name), "`], with `self` as the first fuzzer.")]
            pub fn $name<$($ty,)+ R, Func>(&self, $($arg: &Fuzzer<$ty>,)+ f: Func) -> Fuzzer<R>
            where
                $($ty: 'static,)+
                R: 'static,
                Func: Fn($first_ty, $($ty),+) -> R + Send + Sync + 'static,
            {
                $name(self, $($arg,)+ f)
            }
        }
    };
}

map_n!(
    /// Combine two fuzzers. `a` is generated before `b`.
    ///
    /// ```rust
    /// use fuzzkit::{int, map2, string};
    ///
    /// #[derive(Debug)]
    /// struct User { id: i64, name: String }
    ///
    /// let users = map2(&int(), &string(), |id, name| User { id, name });
    /// # let _ = users;
    /// ```
    map2: A a, B b
);
map_n!(
    /// Combine three fuzzers, generated left to right.
    map3: A a, B b, C c
);
map_n!(
    /// Combine four fuzzers, generated left to right.
    map4: A a, B b, C c, D d
);
map_n!(
    /// Combine five fuzzers, generated left to right.
    map5: A a, B b, C c, D d, E e
);
map_n!(
    /// Combine six fuzzers, generated left to right.
    map6: A a, B b, C c, D d, E e, F f6
);
map_n!(
    /// Combine seven fuzzers, generated left to right.
    map7: A a, B b, C c, D d, E e, F f6, G g
);
map_n!(
    /// Combine eight fuzzers, generated left to right.
    map8: A a, B b, C c, D d, E e, F f6, G g, H h
);
