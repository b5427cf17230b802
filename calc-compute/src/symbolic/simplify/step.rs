/// A step taken by the simplifier, recorded by [`super::simplify_with_steps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+(b+c) = a+b+c` or `a*(b*c) = a*b*c`
    Flatten,

    /// `a+0 = a`
    AddZero,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `a*0 = 0`
    MultiplyZero,

    /// `2*3*a = 6a`, `1*a = a`
    MultiplyNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `0^a = 0` and `1^a = 1`
    PowerOfZeroOrOne,

    /// `2^3 = 8`, `(1/4)^(1/2) = 1/2`
    PowerNumbers,

    /// `2^(3/2) = 2*2^(1/2)`
    SplitExponent,

    /// `(a^b)^c = a^(bc)`
    PowerPower,

    /// `(ab)^c = a^c*b^c`
    DistributePower,

    /// `a(b+c) = ab+ac`
    DistributiveProperty,

    /// `(a+b)^2 = a^2+2ab+b^2`
    ExpandPower,

    /// `E^a = exp(a)`
    EulerPower,

    /// `exp(0) = 1`, `exp(1) = E`
    ExpValue,

    /// `log(1) = 0`, `log(E) = 1`
    LogValue,

    /// `exp(log(a)) = a` and `log(exp(a)) = a`
    ExpLogInverse,

    /// `exp(a)^b = exp(ab)`
    ExpPower,

    /// `exp(a)*exp(b) = exp(a+b)`
    CombineExp,

    /// `sin(pi/6) = 1/2`
    TrigValue,

    /// `asin(1) = pi/2`
    InverseTrigValue,

    /// `sin(-a) = -sin(a)`, `cos(-a) = cos(a)`
    Parity,

    /// `sin(a)^2+cos(a)^2 = 1`, `tan(a)^2+1 = sec(a)^2`, and related forms
    PythagoreanIdentity,

    /// `sin(a)/cos(a) = tan(a)`, `cos(a)/sin(a) = cot(a)`
    QuotientIdentity,
}
