/// A single simplification step applied to an expression.
///
/// Each variant corresponds to one rule in [`super::rules`]. Collect them with a
/// [`StepCollector`](crate::symbolic::step_collector::StepCollector) to see which rules fired
/// during a call to [`simplify_with`](super::simplify_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `(a + b) + c = a + b + c`
    FlattenTerms,

    /// `0+a = a`
    AddZero,

    /// `2 + a + 3 = 5 + a`
    AddNumbers,

    /// `a+a = 2a`
    CombineLikeTerms,

    /// `(a * b) * c = a * b * c`
    FlattenFactors,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2 * a * 3 = 6 * a`
    MultiplyNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0` for positive numeric `a`
    ZeroPower,

    /// `(a^b)^c = a^(b*c)` for integer `c`
    PowerOfPower,

    /// `2^3 = 8`, `2^-1 = 1/2`
    EvaluatePower,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c * b^c` for integer `c`
    DistributePower,

    /// `(a+b)^n = (a+b) * (a+b) * ... * (a+b)` for integer `n >= 2`
    ExpandSumPower,

    /// `i^(4n) = 1`
    I0,

    /// `i^(4n+1) = i`
    I1,

    /// `i^(4n+2) = -1`
    I2,

    /// `i^(4n+3) = -i`
    I3,

    /// `sin(0) = 0`, `cos(0) = 1`, `exp(0) = 1`
    EvaluateCallAtZero,

    /// `ln(1) = 0`
    LnOne,

    /// `sqrt(n)` for a perfect-square rational `n`
    EvaluateSqrt,
}
