//! 测试用的 mcsqs 输出 (bestsqs.out)

use crate::models::AbstractSqs;
use crate::sqs::lat_in_to_sqs;

/// fcc 上的 L1₂ SQS，亚晶格 a (a, b) 和 c (a)，共 32 个格点
pub const FCC_L12: &str = "1.000000 0.000000 0.000000
0.000000 1.000000 0.000000
0.000000 0.000000 1.000000
-1.000000 1.000000 -1.000000
1.000000 -1.000000 -1.000000
-2.000000 -2.000000 0.000000
-1.000000 -2.000000 -1.000000 a_A
-2.000000 -1.000000 -1.000000 a_A
-1.000000 -1.000000 -1.000000 a_B
-0.000000 -1.000000 -1.000000 a_B
-1.000000 -0.000000 -1.000000 a_B
-2.000000 -2.000000 -1.000000 a_B
-1.000000 -1.000000 -2.000000 a_A
-2.000000 -2.000000 -2.000000 a_A
-1.000000 -1.500000 -0.500000 c_A
-1.000000 -1.500000 -1.500000 c_A
-1.000000 -0.500000 -0.500000 c_A
-0.000000 -0.500000 -0.500000 c_A
-0.000000 -0.500000 -1.500000 c_A
-2.000000 -1.500000 -0.500000 c_A
-1.000000 -0.500000 -1.500000 c_A
-2.000000 -1.500000 -1.500000 c_A
-1.500000 -1.000000 -1.500000 c_A
-1.500000 -1.000000 -0.500000 c_A
-0.500000 -1.000000 -0.500000 c_A
-0.500000 0.000000 -1.500000 c_A
-0.500000 -0.000000 -0.500000 c_A
-1.500000 -2.000000 -0.500000 c_A
-0.500000 -1.000000 -1.500000 c_A
-1.500000 -2.000000 -1.500000 c_A
-0.500000 -1.500000 -1.000000 c_A
-1.500000 -0.500000 -1.000000 c_A
-0.500000 -0.500000 -1.000000 c_A
-1.500000 -2.500000 -1.000000 c_A
-2.500000 -1.500000 -1.000000 c_A
-1.500000 -1.500000 -1.000000 c_A
-0.500000 -0.500000 -2.000000 c_A
-1.500000 -1.500000 -2.000000 c_A";

/// B1 岩盐结构 SQS，两个亚晶格各有 a, b 两种占位
pub const ROCKSALT_B1: &str = "1.000000 0.000000 0.000000
0.000000 1.000000 0.000000
0.000000 0.000000 1.000000
2.000000 1.000000 1.000000
-2.000000 1.000000 1.000000
-0.000000 -0.500000 0.500000
-0.500000 1.500000 2.000000 a_A
-0.000000 1.000000 2.000000 a_A
-0.000000 1.500000 2.500000 a_A
0.500000 1.000000 1.500000 a_B
0.500000 1.500000 2.000000 a_B
-1.500000 1.000000 1.500000 a_A
1.000000 0.500000 1.500000 a_A
1.000000 1.000000 2.000000 a_A
-1.000000 0.500000 1.500000 a_B
-1.000000 1.000000 2.000000 a_B
1.500000 1.000000 1.500000 a_B
-0.500000 0.500000 1.000000 a_B
-0.500000 1.000000 1.500000 a_A
-0.000000 -0.000000 1.000000 a_B
-0.000000 0.500000 1.500000 a_B
0.500000 0.500000 1.000000 a_A
-1.000000 1.000000 1.500000 b_B
-0.500000 0.500000 1.500000 b_A
-0.500000 1.000000 2.000000 b_A
0.000000 0.500000 1.000000 b_A
0.000000 1.000000 1.500000 b_B
0.000000 1.500000 2.000000 b_B
0.500000 -0.000000 1.000000 b_B
0.500000 0.500000 1.500000 b_A
0.500000 1.000000 2.000000 b_A
-1.500000 0.500000 1.500000 b_B
1.000000 0.500000 1.000000 b_A
1.000000 1.000000 1.500000 b_A
-1.000000 0.500000 1.000000 b_B
1.500000 0.500000 1.500000 b_B
-0.500000 -0.000000 1.000000 b_B
-0.000000 -0.000000 0.500000 b_A";

/// Ga3Pt5 原型，多字符亚晶格名 aej, bh
pub const GA3PT5: &str = "2.000000 0.000000 0.000000
0.000000 2.000000 0.000000
0.000000 0.000000 1.000000
0.500000 -0.500000 0.000000
0.500000 0.500000 0.000000
0.000000 0.000000 1.000000
0.000000 0.000000 0.000000 aej_A
0.250000 0.250000 0.000000 aej_A
0.750000 0.250000 0.000000 aej_A
0.000000 0.250000 0.500000 aej_A
-0.000000 -0.250000 0.500000 aej_A
0.500000 0.000000 0.000000 bh_A
0.250000 0.000000 0.500000 bh_A
-0.250000 0.000000 0.500000 bh_A";

/// 同上，但占位符号也是多字符的
pub const GA3PT5_MULTI_CHAR: &str = "2.000000 0.000000 0.000000
0.000000 2.000000 0.000000
0.000000 0.000000 1.000000
0.500000 -0.500000 0.000000
0.500000 0.500000 0.000000
0.000000 0.000000 1.000000
0.000000 0.000000 0.000000 aej_Af
0.250000 0.250000 0.000000 aej_Af
0.750000 0.250000 0.000000 aej_Af
0.000000 0.250000 0.500000 aej_Af
-0.000000 -0.250000 0.500000 aej_Af
0.500000 0.000000 0.000000 bh_Aqwerty
0.250000 0.000000 0.500000 bh_Aqwerty
-0.250000 0.000000 0.500000 bh_Aqwerty";

pub fn abstract_sqs(content: &str) -> AbstractSqs {
    lat_in_to_sqs(content, true).unwrap()
}
