/// A per-point descriptor computed over the neighborhoods found by `search`.
pub trait Feature<I: ?Sized, O, S, P> {
    fn compute(&self, input: &I, search: &S, search_param: P) -> O;
}
