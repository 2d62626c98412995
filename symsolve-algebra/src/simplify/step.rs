/// A rewrite performed by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An algebraic identity, such as `x*1 = x`. Holds the identity's source text.
    Identity(&'static str),

    /// `2+3 = 5`
    AddNumbers,

    /// `a + (-1)*a = 0`
    AdditiveInverse,

    /// `2x + 3x = 5x`
    CombineLikeTerms,

    /// `a/b + c/d = (a*d + c*b)/(b*d)`
    FractionSum,

    /// `2*3 = 6`
    MultiplyNumbers,

    /// `x^a * x^b = x^(a+b)`
    CombineLikeFactors,

    /// `6/4 = 3/2`
    ReduceFraction,

    /// `x^a / x^b = x^(a-b)`
    DivideLikeFactors,

    /// `2^3 = 8`
    PowerNumbers,

    /// `(-1)^(1/2) = i`
    SquareRootOfMinusOne,

    /// `(-a)^b = (-1)^b * a^b`
    NegativeBase,

    /// `8^(1/3) = 2`
    ExactRoot,

    /// `i^n` for integer `n`, cycling through `1`, `i`, `-1`, `-i`
    PowerOfI,

    /// `e^(i*t) = cos(t) + i*sin(t)`
    EulerFormula,

    /// `(a*b)^c = a^c * b^c`
    DistributePower,

    /// `(x^a)^n = x^(a*n)` for integer `n`
    PowerOfPower,

    /// `log_b(1) = 0`
    LogarithmOfOne,

    /// `log_b(b) = 1`
    LogarithmOfBase,

    /// `log_b(b^y) = y`
    LogarithmOfPower,

    /// `log_2(8) = 3`
    EvaluateLogarithm,

    /// `+a = a`
    UnaryPlus,

    /// `-a = -1*a`
    Negate,

    /// `4! = 24`
    EvaluateFactorial,

    /// `InverseFactorial(24) = 4`
    EvaluateInverseFactorial,

    /// `W(0) = 0`, `W(e) = 1`, `W(a*e^a) = a`
    EvaluateLambertW,

    /// `sin(pi/6) = 1/2`, and other exact values of the sine and cosine
    TrigonometricValue,

    /// `sin(1) = 0.8414709848078965`
    EvaluateTrigonometric,

    /// `x*x*(1/x) = x`, merging repeated factors of each term into powers
    NormalizeExponents,
}
